pub mod storage;
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
pub mod repository;
pub use repository::Repository;
