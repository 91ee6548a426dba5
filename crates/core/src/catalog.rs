use std::ops::RangeInclusive;
use thiserror::Error;

use crate::model::{ExamYear, SubjectCode};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog needs at least one subject")]
    NoSubjects,

    #[error("duplicate subject code: {0}")]
    DuplicateSubject(SubjectCode),

    #[error("year range start {start} is after end {end}")]
    InvalidYearRange { start: i32, end: i32 },
}

/// Rejected user input for an exam operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("year is not a number: {0}")]
    YearNotNumeric(String),

    #[error("year {year} must be between {start} and {end}")]
    YearOutOfRange { year: i32, start: i32, end: i32 },
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Fixed subject list and inclusive year range the tracker manages.
///
/// Threaded explicitly into reconciliation, aggregation, and the service
/// layer so tests can run against alternate catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    subjects: Vec<SubjectCode>,
    start_year: i32,
    end_year: i32,
}

impl Catalog {
    /// Creates a catalog from a subject list and an inclusive year range.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the subject list is empty or contains
    /// duplicates, or if the range is inverted.
    pub fn new(
        subjects: Vec<SubjectCode>,
        years: RangeInclusive<i32>,
    ) -> Result<Self, CatalogError> {
        if subjects.is_empty() {
            return Err(CatalogError::NoSubjects);
        }
        for (i, subject) in subjects.iter().enumerate() {
            if subjects[..i].contains(subject) {
                return Err(CatalogError::DuplicateSubject(subject.clone()));
            }
        }
        let (start_year, end_year) = (*years.start(), *years.end());
        if start_year > end_year {
            return Err(CatalogError::InvalidYearRange {
                start: start_year,
                end: end_year,
            });
        }
        Ok(Self {
            subjects,
            start_year,
            end_year,
        })
    }

    /// The CNC session catalog the tracker shipped with: seven written
    /// subjects, sessions 2010 through 2024.
    #[must_use]
    pub fn default_cnc() -> Self {
        let subjects = ["math1", "math2", "pc1", "pc2", "chimie", "ge", "gm"]
            .into_iter()
            .map(SubjectCode::new)
            .collect();
        Self {
            subjects,
            start_year: 2010,
            end_year: 2024,
        }
    }

    // Accessors
    #[must_use]
    pub fn subjects(&self) -> &[SubjectCode] {
        &self.subjects
    }

    /// Catalog years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = ExamYear> + '_ {
        (self.start_year..=self.end_year).map(ExamYear::new)
    }

    #[must_use]
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    #[must_use]
    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    #[must_use]
    pub fn contains_subject(&self, subject: &SubjectCode) -> bool {
        self.subjects.contains(subject)
    }

    #[must_use]
    pub fn contains_year(&self, year: ExamYear) -> bool {
        (self.start_year..=self.end_year).contains(&year.value())
    }

    /// Normalizes raw subject input and requires catalog membership.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownSubject` when the code is not in
    /// the catalog.
    pub fn resolve_subject(&self, raw: &str) -> Result<SubjectCode, ValidationError> {
        let code = SubjectCode::new(raw);
        if self.contains_subject(&code) {
            Ok(code)
        } else {
            Err(ValidationError::UnknownSubject(raw.trim().to_string()))
        }
    }

    /// Parses raw year input and requires it to be inside the range.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::YearNotNumeric` for non-numeric input and
    /// `ValidationError::YearOutOfRange` for years outside the range.
    pub fn resolve_year(&self, raw: &str) -> Result<ExamYear, ValidationError> {
        let year = raw
            .parse::<ExamYear>()
            .map_err(|_| ValidationError::YearNotNumeric(raw.trim().to_string()))?;
        if self.contains_year(year) {
            Ok(year)
        } else {
            Err(ValidationError::YearOutOfRange {
                year: year.value(),
                start: self.start_year,
                end: self.end_year,
            })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
