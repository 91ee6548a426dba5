#![forbid(unsafe_code)]

pub mod json_file;
pub mod repository;

pub use json_file::JsonFileStore;
pub use repository::{DatasetStore, InMemoryStore, StorageError};
