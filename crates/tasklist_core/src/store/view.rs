//! Derived, non-mutating views over the collection.
//!
//! # Invariants
//! - Derivation is a pure function of (records, filter, search term).
//! - Completion filter is applied before text search.
//! - Output keeps collection order.

use crate::model::filter::FilterKind;
use crate::model::record::Record;
use serde::Serialize;
use std::sync::Arc;

/// Aggregate counters used for "N items left" style summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Returns whether `text` contains `term`, ignoring case.
///
/// An empty term matches every record.
pub fn matches_search(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&term.to_lowercase())
}

/// Applies completion filter then case-insensitive substring search.
pub fn visible_records(records: &[Arc<Record>], filter: FilterKind, term: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .filter(|record| matches_search(&record.text, term))
        .map(|record| record.as_ref().clone())
        .collect()
}

/// Counts total, active and completed records.
pub fn count_records(records: &[Arc<Record>]) -> RecordCounts {
    let completed = records.iter().filter(|record| record.completed).count();
    RecordCounts {
        total: records.len(),
        active: records.len() - completed,
        completed,
    }
}
