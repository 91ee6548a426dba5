use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Calendar year of an exam session.
///
/// The snapshot format stores years as decimal strings, so serialization
/// goes through `Display`/`FromStr` rather than a raw integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExamYear(i32);

impl ExamYear {
    /// Creates a new `ExamYear`
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    /// Returns the underlying year value
    #[must_use]
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Debug for ExamYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExamYear({})", self.0)
    }
}

impl fmt::Display for ExamYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a year from string input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseYearError {
    raw: String,
}

impl fmt::Display for ParseYearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "year is not a number: {}", self.raw)
    }
}

impl std::error::Error for ParseYearError {}

impl FromStr for ExamYear {
    type Err = ParseYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(ExamYear::new)
            .map_err(|_| ParseYearError { raw: s.to_string() })
    }
}

impl Serialize for ExamYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExamYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
