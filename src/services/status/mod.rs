pub mod memory;
pub mod store;

pub use memory::InMemoryStatusStore;
pub use store::{StatusResult, StatusStore, StatusStoreError};
