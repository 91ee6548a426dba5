//! Shared error types for the services crate.

use thiserror::Error;

use cnc_core::catalog::ValidationError;
use storage::repository::StorageError;

/// Errors emitted by `ExamService`.
///
/// Domain-level outcomes (duplicate adds, missing records, repeat
/// completions) are not errors; they come back as `ExamOutcome`
/// classifications. Broken storage always surfaces here, and the read
/// views surface rejected subject input here as well.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
