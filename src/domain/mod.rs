pub mod sequence;
pub mod store;
pub mod todo;
