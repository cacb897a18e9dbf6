//! Record id generation.
//!
//! # Invariants
//! - Built-in generators never return the same id twice per instance.
//! - Built-in generators never return the nil uuid.

use crate::model::record::RecordId;
use uuid::Uuid;

/// Source of fresh record ids.
///
/// Hosts may plug in their own generator; the store still rejects ids that
/// collide with live records.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> RecordId;
}

/// Random uuid v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> RecordId {
        Uuid::new_v4()
    }
}

/// Monotonic ids encoded as `Uuid::from_u128(n)`, starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    next: u128,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> RecordId {
        let id = Uuid::from_u128(self.next);
        self.next = self.next.wrapping_add(1).max(1);
        id
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> RecordId + Send,
{
    fn next_id(&mut self) -> RecordId {
        self()
    }
}
