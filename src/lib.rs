//! Data-access layer for a to-do list backed by a document database.
//!
//! [`TodoItemDao`] mediates all reads and writes of [`TodoItem`] records and
//! draws sequential ids from a persisted counter. It is generic over the
//! [`ItemStore`] capability; [`MongoItemStore`] talks to a real server and
//! [`MemoryItemStore`] backs tests and local development.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::todo_dao::TodoItemDao;
pub use config::DbConfig;
pub use domain::sequence::{Sequence, TODO_ITEM_SEQUENCE};
pub use domain::store::ItemStore;
pub use domain::todo::{EmptyDescription, TodoItem};
pub use error::{Result, TodoError};
pub use infrastructure::memory_store::MemoryItemStore;
pub use infrastructure::mongo_store::MongoItemStore;
