pub mod memory_store;
pub mod mongo_store;
