use cnc_core::catalog::ValidationError;
use cnc_core::model::{ExamYear, SubjectCode};

/// Classification of a mutation attempt, consumed by the presentation
/// layer for user feedback.
///
/// Each variant carries the subject and year it concerns so the caller can
/// render a message without re-parsing its own input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamOutcome {
    /// A new pending record was appended and persisted.
    Added { subject: SubjectCode, year: ExamYear },
    /// A record for the subject and year already exists; nothing changed.
    AlreadyExists { subject: SubjectCode, year: ExamYear },
    /// The record moved from pending to completed and was persisted.
    Completed { subject: SubjectCode, year: ExamYear },
    /// The record was completed earlier; its completion date is untouched.
    AlreadyCompleted { subject: SubjectCode, year: ExamYear },
    /// The record's notes were overwritten and persisted.
    NotesUpdated { subject: SubjectCode, year: ExamYear },
    /// No record matches the subject and year.
    NotFound { subject: SubjectCode, year: ExamYear },
    /// The input never reached the dataset.
    Rejected(ValidationError),
}

impl ExamOutcome {
    /// True for the variants that changed the dataset.
    #[must_use]
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            Self::Added { .. } | Self::Completed { .. } | Self::NotesUpdated { .. }
        )
    }
}
