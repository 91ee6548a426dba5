use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use cnc_core::model::Dataset;

use crate::repository::{DatasetStore, StorageError};

/// Flat-file store keeping the whole dataset as one pretty-printed JSON
/// snapshot, the layout the tracker has always used on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the given snapshot path. The file does not have
    /// to exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("dataset"), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DatasetStore for JsonFileStore {
    fn load(&self) -> Result<Dataset, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // No snapshot yet means a fresh tracker, not an error.
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Dataset::new()),
            Err(err) => return Err(StorageError::Io(err)),
        };
        serde_json::from_str(&raw).map_err(|err| StorageError::Malformed(err.to_string()))
    }

    fn save(&self, dataset: &Dataset) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(dataset)
            .map_err(|err| StorageError::Malformed(err.to_string()))?;
        // Write beside the target and rename into place so an interrupted
        // save never leaves a torn snapshot.
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), "dataset snapshot written");
        Ok(())
    }
}
