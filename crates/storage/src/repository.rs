use std::sync::{Arc, Mutex};
use thiserror::Error;

use cnc_core::model::Dataset;

/// Errors surfaced by dataset stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset: {0}")]
    Malformed(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Store contract for the full dataset snapshot.
///
/// One snapshot per save; there is no partial write and no per-record
/// access. A missing snapshot is an empty dataset. A corrupt one is an
/// error: catalog gaps are repaired upstream, corruption never is.
pub trait DatasetStore: Send + Sync {
    /// Reads the persisted dataset.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot exists but cannot be read or
    /// parsed.
    fn load(&self) -> Result<Dataset, StorageError>;

    /// Replaces the persisted dataset with one full snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    fn save(&self, dataset: &Dataset) -> Result<(), StorageError>;
}

/// Simple in-memory store implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    dataset: Arc<Mutex<Dataset>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatasetStore for InMemoryStore {
    fn load(&self) -> Result<Dataset, StorageError> {
        let guard = self
            .dataset
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, dataset: &Dataset) -> Result<(), StorageError> {
        let mut guard = self
            .dataset
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *guard = dataset.clone();
        Ok(())
    }
}
