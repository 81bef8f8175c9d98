pub mod todo_dao;
