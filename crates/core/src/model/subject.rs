use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized subject code, e.g. `math1` or `chimie`.
///
/// Raw input is trimmed and ASCII-lowercased on construction, matching how
/// the tracker has always treated form input. Whether the code belongs to
/// the configured catalog is a separate question answered by
/// `Catalog::resolve_subject`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectCode(String);

impl SubjectCode {
    /// Creates a normalized subject code from raw input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_ascii_lowercase())
    }

    /// Returns the normalized code
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubjectCode({})", self.0)
    }
}

impl fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
