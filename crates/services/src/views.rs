use cnc_core::model::{ExamRecord, SubjectCode};
use cnc_core::stats::{CompletionStats, Statistics};

/// Aggregated view backing the landing page.
///
/// Presentation-agnostic: no pre-formatted strings, no layout assumptions.
/// The caller renders percentages and labels as it sees fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Catalog subjects in configured order.
    pub subjects: Vec<SubjectCode>,
    pub stats: Statistics,
}

/// One subject's exams, newest session first, with its counters.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectView {
    pub subject: SubjectCode,
    pub exams: Vec<ExamRecord>,
    pub stats: CompletionStats,
}
