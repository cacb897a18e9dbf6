//! Record domain model.
//!
//! # Responsibility
//! - Define the canonical list entry owned by the collection store.
//! - Validate user-supplied labels before they enter the collection.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - `text` is trimmed and non-empty.
//! - `editing` is transient UI state; the store keeps at most one record in
//!   edit mode.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for every record in a collection.
pub type RecordId = Uuid;

/// Optional importance marker attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Stable string id used in seeds and serialized records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority parse failure for unknown labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityParseError(pub String);

impl Display for PriorityParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported priority `{}`; expected low|medium|high",
            self.0
        )
    }
}

impl Error for PriorityParseError {}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(PriorityParseError(value.trim().to_string())),
        }
    }
}

/// Validation failures for record input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Text is empty after trimming.
    EmptyText,
    /// Nil uuid cannot identify a record.
    NilId,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "record text must not be blank"),
            Self::NilId => write!(f, "record id must not be nil"),
        }
    }
}

impl Error for RecordValidationError {}

/// Trims a user-supplied label and rejects blank input.
pub fn normalize_text(text: &str) -> Result<String, RecordValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RecordValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// One entry of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    /// Store-generated identity, immutable after creation.
    pub id: RecordId,
    /// Trimmed, non-empty label.
    pub text: String,
    pub completed: bool,
    pub priority: Option<Priority>,
    /// Transient edit-mode flag.
    pub editing: bool,
}

impl Record {
    /// Creates an active, idle record after validating `id` and `text`.
    pub fn new(id: RecordId, text: &str) -> Result<Self, RecordValidationError> {
        if id.is_nil() {
            return Err(RecordValidationError::NilId);
        }
        Ok(Self {
            id,
            text: normalize_text(text)?,
            completed: false,
            priority: None,
            editing: false,
        })
    }

    /// Validates invariants for records built field by field.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.id.is_nil() {
            return Err(RecordValidationError::NilId);
        }
        if self.text.trim().is_empty() {
            return Err(RecordValidationError::EmptyText);
        }
        Ok(())
    }

    /// Returns whether the record still counts as an open item.
    pub fn is_active(&self) -> bool {
        !self.completed
    }

    pub(crate) fn with_completed(&self, completed: bool) -> Self {
        Self {
            completed,
            ..self.clone()
        }
    }

    pub(crate) fn with_editing(&self, editing: bool) -> Self {
        Self {
            editing,
            ..self.clone()
        }
    }
}

#[derive(Deserialize)]
struct RawRecord {
    id: RecordId,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    editing: bool,
}

impl TryFrom<RawRecord> for Record {
    type Error = RecordValidationError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let mut record = Record::new(raw.id, &raw.text)?;
        record.completed = raw.completed;
        record.priority = raw.priority;
        record.editing = raw.editing;
        Ok(record)
    }
}
