use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_QUERY: &str = "Summarise my Blood Test Report";

/// The user's question about their report, trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisQuery(String);

impl AnalysisQuery {
    /// Builds the query from the optional form field. Missing or blank input
    /// falls back to [`DEFAULT_QUERY`].
    pub fn from_form(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(q) if !q.is_empty() => Self(q.to_string()),
            _ => Self(DEFAULT_QUERY.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AnalysisQuery {
    fn default() -> Self {
        Self(DEFAULT_QUERY.to_string())
    }
}

impl fmt::Display for AnalysisQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
