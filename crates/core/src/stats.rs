use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::model::{Dataset, SubjectCode};

//
// ─── STATISTICS ────────────────────────────────────────────────────────────────
//

/// Completed/total counters for one subject or for the whole catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionStats {
    completed: usize,
    total: usize,
}

impl CompletionStats {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Completion share in percent; 0 when there are no records.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Per-subject and overall completion derived from a dataset.
///
/// Derived, never persisted. The grand total sums raw counts and computes
/// its own percentage from the sums rather than averaging per-subject
/// percentages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    subjects: BTreeMap<SubjectCode, CompletionStats>,
    total: CompletionStats,
}

impl Statistics {
    /// Counters for one subject; zeroed when the subject is unknown.
    #[must_use]
    pub fn subject(&self, subject: &SubjectCode) -> CompletionStats {
        self.subjects.get(subject).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn total(&self) -> CompletionStats {
        self.total
    }

    /// Iterates per-subject counters in code order.
    pub fn subjects(&self) -> impl Iterator<Item = (&SubjectCode, CompletionStats)> {
        self.subjects.iter().map(|(code, stats)| (code, *stats))
    }
}

/// Counts completion over every catalog subject.
///
/// Pure function: the dataset is read as-is, no I/O. Records filed under
/// non-catalog codes are ignored; out-of-range years under a catalog
/// subject still count.
#[must_use]
pub fn aggregate(dataset: &Dataset, catalog: &Catalog) -> Statistics {
    let mut subjects = BTreeMap::new();
    let mut completed_sum = 0;
    let mut total_sum = 0;
    for subject in catalog.subjects() {
        let records = dataset.records(subject);
        let completed = records.iter().filter(|record| record.is_completed()).count();
        let stats = CompletionStats::new(completed, records.len());
        completed_sum += stats.completed();
        total_sum += stats.total();
        subjects.insert(subject.clone(), stats);
    }
    Statistics {
        subjects,
        total: CompletionStats::new(completed_sum, total_sum),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
