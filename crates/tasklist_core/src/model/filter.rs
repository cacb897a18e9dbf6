//! Completion filter for derived views.

use crate::model::record::Record;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Completion predicate applied before text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// No completion filtering.
    #[default]
    All,
    /// Only records with `completed == false`.
    Active,
    /// Only records with `completed == true`.
    Completed,
}

impl FilterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns whether `record` passes this completion filter.
    pub fn matches(self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Active => !record.completed,
            Self::Completed => record.completed,
        }
    }
}

impl Display for FilterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter parse failure for labels outside `all|active|completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParseError(pub String);

impl Display for FilterParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for FilterParseError {}

impl FromStr for FilterKind {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(FilterParseError(value.trim().to_string())),
        }
    }
}
