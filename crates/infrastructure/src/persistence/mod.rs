//! Secure store implementations.

mod file_store;
mod memory_store;

pub use file_store::FileSecureStore;
pub use memory_store::MemorySecureStore;
