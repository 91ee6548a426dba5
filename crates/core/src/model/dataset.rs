use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::exam::ExamRecord;
use crate::model::subject::SubjectCode;
use crate::model::year::ExamYear;

/// Full persisted state: every subject's exam records, keyed by code.
///
/// Serializes as a JSON object keyed by subject code. `BTreeMap` keeps the
/// key order deterministic across saves. Invariant maintained by callers:
/// within one subject's list, year values are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    subjects: BTreeMap<SubjectCode, Vec<ExamRecord>>,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for one subject, empty when the subject has none yet.
    #[must_use]
    pub fn records(&self, subject: &SubjectCode) -> &[ExamRecord] {
        self.subjects.get(subject).map_or(&[], Vec::as_slice)
    }

    /// Mutable record list for a subject, created empty on first access.
    pub fn records_mut(&mut self, subject: &SubjectCode) -> &mut Vec<ExamRecord> {
        self.subjects.entry(subject.clone()).or_default()
    }

    #[must_use]
    pub fn find(&self, subject: &SubjectCode, year: ExamYear) -> Option<&ExamRecord> {
        self.records(subject).iter().find(|record| record.year() == year)
    }

    pub fn find_mut(&mut self, subject: &SubjectCode, year: ExamYear) -> Option<&mut ExamRecord> {
        self.subjects
            .get_mut(subject)
            .and_then(|records| records.iter_mut().find(|record| record.year() == year))
    }

    /// Iterates all (subject, records) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SubjectCode, &[ExamRecord])> {
        self.subjects
            .iter()
            .map(|(code, records)| (code, records.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
