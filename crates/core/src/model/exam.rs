use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::year::ExamYear;

//
// ─── EXAM RECORD ───────────────────────────────────────────────────────────────
//

/// Completion state of a single exam record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamStatus {
    Pending,
    Completed,
}

/// One past exam paper for a subject in a given session year.
///
/// A record moves from `Pending` to `Completed` exactly once; completion is
/// never reverted and the completion date is stamped on the first
/// transition only. Notes may be rewritten in either state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    year: ExamYear,
    #[serde(default)]
    notes: String,
    completed: bool,
    added_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_date: Option<NaiveDate>,
}

impl ExamRecord {
    /// Creates a pending record added on the given date.
    #[must_use]
    pub fn new(year: ExamYear, notes: impl Into<String>, added_on: NaiveDate) -> Self {
        Self {
            year,
            notes: notes.into(),
            completed: false,
            added_date: added_on,
            completed_date: None,
        }
    }

    // Accessors
    #[must_use]
    pub fn year(&self) -> ExamYear {
        self.year
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn status(&self) -> ExamStatus {
        if self.completed {
            ExamStatus::Completed
        } else {
            ExamStatus::Pending
        }
    }

    #[must_use]
    pub fn added_date(&self) -> NaiveDate {
        self.added_date
    }

    /// Date the record was completed, absent while pending.
    #[must_use]
    pub fn completed_date(&self) -> Option<NaiveDate> {
        self.completed_date
    }

    /// Marks the record completed on the given date.
    ///
    /// Returns `false` without touching the record if it was already
    /// completed, so the first completion date survives repeat calls.
    pub fn mark_completed(&mut self, on: NaiveDate) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.completed_date = Some(on);
        true
    }

    /// Overwrites the notes. Empty text is allowed.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
