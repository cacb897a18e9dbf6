//! Change notification for store consumers.
//!
//! # Responsibility
//! - Keep subscriber callbacks and dispatch change events in order.
//!
//! # Invariants
//! - Subscribers are notified in registration order.
//! - Unsubscribed callbacks are never invoked again.
//! - Events are only emitted for operations that changed state.

use crate::model::record::RecordId;

/// What an operation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// A record was appended.
    Added(RecordId),
    /// Fields of one or more records changed.
    Updated(Vec<RecordId>),
    /// Records left the collection.
    Removed(Vec<RecordId>),
    /// Collection order changed.
    Reordered,
    /// Filter or search term changed.
    ViewChanged,
    /// Selection set changed without touching records.
    SelectionChanged,
}

/// Notification delivered after a state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Store version after the change.
    pub version: u64,
    pub kind: ChangeKind,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Boxed subscriber callback.
pub type Listener = Box<dyn FnMut(&ChangeEvent) + Send>;

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn notify(&mut self, event: &ChangeEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
