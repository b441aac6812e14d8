//! Key-value store implementations.

mod file_store;
mod memory_store;

pub use file_store::{JsonFileStore, STORE_FILE_NAME};
pub use memory_store::MemoryStore;
