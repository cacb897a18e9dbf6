//! Bulk-action selection set.
//!
//! # Invariants
//! - After every store operation each selected id references a live record.
//! - Pruning is silent; it is maintenance, not a user-facing failure.

use crate::model::record::RecordId;
use std::collections::BTreeSet;

/// Ids currently marked for bulk operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<RecordId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    /// Replaces the whole selection; returns whether anything changed.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = RecordId>) -> bool {
        let next: BTreeSet<RecordId> = ids.into_iter().collect();
        if next == self.ids {
            return false;
        }
        self.ids = next;
        true
    }

    /// Empties the selection; returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.ids.is_empty();
        self.ids.clear();
        had_any
    }

    /// Drops ids for which `is_live` returns false; returns how many were dropped.
    pub fn prune(&mut self, is_live: impl Fn(&RecordId) -> bool) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| is_live(id));
        before - self.ids.len()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &BTreeSet<RecordId> {
        &self.ids
    }
}
