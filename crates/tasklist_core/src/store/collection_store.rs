//! In-memory collection store.
//!
//! # Responsibility
//! - Own the ordered record collection plus filter, search and selection state.
//! - Apply mutations copy-on-write and notify subscribers afterwards.
//!
//! # Invariants
//! - Record ids are unique within the collection at all times.
//! - At most one record has `editing == true`.
//! - Every selected id references a live record.
//! - Mutations never touch a published `Arc<Record>`; they swap in new values.
//! - `version` grows by exactly one per state-changing operation.

use crate::config::StoreConfig;
use crate::model::filter::FilterKind;
use crate::model::record::{normalize_text, Priority, Record, RecordId, RecordValidationError};
use crate::seed::{parse_checklist, SeedRecord};
use crate::store::id_gen::IdGenerator;
use crate::store::observer::{ChangeEvent, ChangeKind, ObserverRegistry, SubscriptionId};
use crate::store::selection::SelectionSet;
use crate::store::view::{count_records, visible_records, RecordCounts};
use log::{debug, warn};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Input failed record validation (blank text, nil id).
    Validation(RecordValidationError),
    /// No record with this id exists.
    NotFound(RecordId),
    /// The id generator produced an id that is already live.
    DuplicateId(RecordId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::DuplicateId(id) => write!(f, "generated record id already in use: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Shared collection value handed to consumers.
pub type Collection = Arc<Vec<Arc<Record>>>;

/// Versioned view of the collection at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub records: Collection,
}

impl Snapshot {
    /// Returns whether both snapshots share the same collection value.
    pub fn same_collection(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

/// Owner of one record collection and its view state.
pub struct CollectionStore {
    records: Collection,
    filter: FilterKind,
    search_term: String,
    selection: SelectionSet,
    version: u64,
    id_gen: Box<dyn IdGenerator>,
    observers: ObserverRegistry,
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("records", &self.records)
            .field("filter", &self.filter)
            .field("search_term", &self.search_term)
            .field("selection", &self.selection)
            .field("version", &self.version)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

impl CollectionStore {
    /// Creates an empty store using the configured id strategy.
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_id_generator(config, config.id_strategy.generator())
    }

    /// Creates an empty store with a host-supplied id generator.
    pub fn with_id_generator(config: &StoreConfig, id_gen: Box<dyn IdGenerator>) -> Self {
        debug!(
            "event=store_init module=store status=ok id_strategy={} filter={}",
            config.id_strategy.as_str(),
            config.initial_filter
        );
        Self {
            records: Arc::new(Vec::new()),
            filter: config.initial_filter,
            search_term: String::new(),
            selection: SelectionSet::new(),
            version: 0,
            id_gen,
            observers: ObserverRegistry::default(),
        }
    }

    /// Creates a store pre-populated from `seed`, in seed order.
    ///
    /// Fails on the first seed with blank text. Seeding does not bump the
    /// version.
    pub fn with_seed(
        config: &StoreConfig,
        seed: impl IntoIterator<Item = SeedRecord>,
    ) -> StoreResult<Self> {
        let mut store = Self::new(config);
        let mut records = Vec::new();
        let mut live = HashSet::new();

        for item in seed {
            let text = normalize_text(&item.text)?;
            let id = store.id_gen.next_id();
            if id.is_nil() {
                return Err(RecordValidationError::NilId.into());
            }
            if !live.insert(id) {
                warn!("event=seed_load module=store status=error reason=duplicate_id id={id}");
                return Err(StoreError::DuplicateId(id));
            }
            records.push(Arc::new(Record {
                id,
                text,
                completed: item.completed,
                priority: item.priority,
                editing: false,
            }));
        }

        debug!(
            "event=seed_load module=store status=ok count={}",
            records.len()
        );
        store.records = Arc::new(records);
        Ok(store)
    }

    /// Creates a store from a markdown task list.
    pub fn from_checklist(config: &StoreConfig, markdown: &str) -> StoreResult<Self> {
        Self::with_seed(config, parse_checklist(markdown))
    }

    /// Appends a new active record and returns it.
    pub fn add(&mut self, text: &str) -> StoreResult<Record> {
        let text = normalize_text(text)?;
        let id = self.mint_id()?;
        let record = Record {
            id,
            text,
            completed: false,
            priority: None,
            editing: false,
        };

        let mut next = self.records.as_ref().clone();
        next.push(Arc::new(record.clone()));
        self.records = Arc::new(next);

        debug!(
            "event=record_add module=store status=ok id={id} len={}",
            self.records.len()
        );
        self.commit(ChangeKind::Added(id));
        Ok(record)
    }

    /// Flips `completed` on one record.
    pub fn toggle(&mut self, id: RecordId) -> StoreResult<()> {
        let index = self.position(id)?;
        let updated = self.records[index].with_completed(!self.records[index].completed);
        self.replace(vec![(index, updated)]);
        self.commit(ChangeKind::Updated(vec![id]));
        Ok(())
    }

    /// Removes one record and drops it from the selection.
    pub fn remove(&mut self, id: RecordId) -> StoreResult<()> {
        let index = self.position(id)?;
        let mut next = self.records.as_ref().clone();
        next.remove(index);
        self.records = Arc::new(next);
        self.selection.prune(|selected| *selected != id);

        debug!(
            "event=record_remove module=store status=ok id={id} len={}",
            self.records.len()
        );
        self.commit(ChangeKind::Removed(vec![id]));
        Ok(())
    }

    /// Removes every record whose id is in `ids`; unknown ids are ignored.
    ///
    /// Returns how many records were removed.
    pub fn bulk_remove(&mut self, ids: impl IntoIterator<Item = RecordId>) -> usize {
        let targets: HashSet<RecordId> = ids.into_iter().collect();
        let (removed, kept): (Vec<_>, Vec<_>) = self
            .records
            .iter()
            .cloned()
            .partition(|record| targets.contains(&record.id));
        if removed.is_empty() {
            return 0;
        }

        self.records = Arc::new(kept);
        self.prune_selection();

        let removed_ids: Vec<RecordId> = removed.iter().map(|record| record.id).collect();
        debug!(
            "event=record_bulk_remove module=store status=ok requested={} removed={} len={}",
            targets.len(),
            removed_ids.len(),
            self.records.len()
        );
        self.commit(ChangeKind::Removed(removed_ids.clone()));
        removed_ids.len()
    }

    /// Puts one record in edit mode, cancelling any other edit.
    pub fn begin_edit(&mut self, id: RecordId) -> StoreResult<()> {
        let index = self.position(id)?;
        if self.records[index].editing {
            return Ok(());
        }

        let mut updates = Vec::new();
        for (other_index, other) in self.records.iter().enumerate() {
            if other.editing {
                updates.push((other_index, other.with_editing(false)));
            }
        }
        updates.push((index, self.records[index].with_editing(true)));

        let changed = updates.iter().map(|(_, record)| record.id).collect();
        self.replace(updates);
        self.commit(ChangeKind::Updated(changed));
        Ok(())
    }

    /// Replaces the text of one record and leaves edit mode.
    ///
    /// Blank text is rejected and the record stays in its current edit state.
    pub fn commit_edit(&mut self, id: RecordId, new_text: &str) -> StoreResult<()> {
        let index = self.position(id)?;
        let text = normalize_text(new_text)?;

        let current = &self.records[index];
        if current.text == text && !current.editing {
            return Ok(());
        }
        let updated = Record {
            text,
            editing: false,
            ..current.as_ref().clone()
        };
        self.replace(vec![(index, updated)]);
        self.commit(ChangeKind::Updated(vec![id]));
        Ok(())
    }

    /// Leaves edit mode without changing text. No-op when not editing.
    pub fn cancel_edit(&mut self, id: RecordId) -> StoreResult<()> {
        let index = self.position(id)?;
        if !self.records[index].editing {
            return Ok(());
        }
        let updated = self.records[index].with_editing(false);
        self.replace(vec![(index, updated)]);
        self.commit(ChangeKind::Updated(vec![id]));
        Ok(())
    }

    /// Sets or clears the priority of one record.
    pub fn set_priority(&mut self, id: RecordId, priority: Option<Priority>) -> StoreResult<()> {
        let index = self.position(id)?;
        if self.records[index].priority == priority {
            return Ok(());
        }
        let updated = Record {
            priority,
            ..self.records[index].as_ref().clone()
        };
        self.replace(vec![(index, updated)]);
        self.commit(ChangeKind::Updated(vec![id]));
        Ok(())
    }

    /// Sets `completed` on every listed record; unknown ids are ignored.
    ///
    /// Returns how many records actually changed.
    pub fn set_completed_for(
        &mut self,
        ids: impl IntoIterator<Item = RecordId>,
        completed: bool,
    ) -> usize {
        let targets: HashSet<RecordId> = ids.into_iter().collect();
        let updates: Vec<(usize, Record)> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| targets.contains(&record.id) && record.completed != completed)
            .map(|(index, record)| (index, record.with_completed(completed)))
            .collect();
        self.apply_completion_updates(updates)
    }

    /// Completes everything, or reopens everything when all are completed.
    pub fn toggle_all(&mut self) -> usize {
        let target = self.records.iter().any(|record| record.is_active());
        let updates: Vec<(usize, Record)> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.completed != target)
            .map(|(index, record)| (index, record.with_completed(target)))
            .collect();
        self.apply_completion_updates(updates)
    }

    /// Removes all completed records.
    pub fn clear_completed(&mut self) -> usize {
        let done: Vec<RecordId> = self
            .records
            .iter()
            .filter(|record| record.completed)
            .map(|record| record.id)
            .collect();
        self.bulk_remove(done)
    }

    /// Moves one record to `to_index`, clamped to the last position.
    pub fn move_record(&mut self, id: RecordId, to_index: usize) -> StoreResult<()> {
        let from = self.position(id)?;
        let to = to_index.min(self.records.len() - 1);
        if from == to {
            return Ok(());
        }

        let mut next = self.records.as_ref().clone();
        let record = next.remove(from);
        next.insert(to, record);
        self.records = Arc::new(next);

        debug!("event=record_move module=store status=ok id={id} from={from} to={to}");
        self.commit(ChangeKind::Reordered);
        Ok(())
    }

    /// Sets the completion filter for derived views.
    pub fn set_filter(&mut self, filter: FilterKind) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.commit(ChangeKind::ViewChanged);
    }

    /// Sets the free-text search term for derived views.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if self.search_term == term {
            return;
        }
        self.search_term = term;
        self.commit(ChangeKind::ViewChanged);
    }

    /// Records passing the current filter and search term, in collection order.
    pub fn visible_records(&self) -> Vec<Record> {
        visible_records(&self.records, self.filter, &self.search_term)
    }

    /// Flips selection of one record; returns whether it is now selected.
    pub fn toggle_select(&mut self, id: RecordId) -> StoreResult<bool> {
        self.position(id)?;
        let selected = self.selection.toggle(id);
        self.commit(ChangeKind::SelectionChanged);
        Ok(selected)
    }

    /// Selects exactly the currently visible records.
    pub fn select_all_visible(&mut self) {
        let visible = self.visible_records().into_iter().map(|record| record.id);
        if self.selection.replace(visible) {
            self.commit(ChangeKind::SelectionChanged);
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.commit(ChangeKind::SelectionChanged);
        }
    }

    pub fn selected_ids(&self) -> BTreeSet<RecordId> {
        self.selection.ids().clone()
    }

    /// Removes every selected record; the selection ends up empty.
    pub fn remove_selected(&mut self) -> usize {
        let selected = self.selected_ids();
        self.bulk_remove(selected)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .map(|record| record.as_ref())
    }

    /// Current collection in order.
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Id of the record currently in edit mode, if any.
    pub fn editing_id(&self) -> Option<RecordId> {
        self.records
            .iter()
            .find(|record| record.editing)
            .map(|record| record.id)
    }

    pub fn counts(&self) -> RecordCounts {
        count_records(&self.records)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            records: Arc::clone(&self.records),
        }
    }

    /// Registers a callback run after every state-changing operation.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ChangeEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(Box::new(listener))
    }

    /// Removes a callback; returns `false` when the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    fn position(&self, id: RecordId) -> StoreResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn mint_id(&mut self) -> StoreResult<RecordId> {
        let id = self.id_gen.next_id();
        if id.is_nil() {
            return Err(RecordValidationError::NilId.into());
        }
        if self.records.iter().any(|record| record.id == id) {
            warn!("event=record_add module=store status=error reason=duplicate_id id={id}");
            return Err(StoreError::DuplicateId(id));
        }
        Ok(id)
    }

    fn replace(&mut self, updates: Vec<(usize, Record)>) {
        let mut next = self.records.as_ref().clone();
        for (index, record) in updates {
            next[index] = Arc::new(record);
        }
        self.records = Arc::new(next);
    }

    fn apply_completion_updates(&mut self, updates: Vec<(usize, Record)>) -> usize {
        if updates.is_empty() {
            return 0;
        }
        let changed: Vec<RecordId> = updates.iter().map(|(_, record)| record.id).collect();
        self.replace(updates);
        debug!(
            "event=record_bulk_complete module=store status=ok changed={}",
            changed.len()
        );
        let count = changed.len();
        self.commit(ChangeKind::Updated(changed));
        count
    }

    fn prune_selection(&mut self) {
        let live: HashSet<RecordId> = self.records.iter().map(|record| record.id).collect();
        self.selection.prune(|id| live.contains(id));
    }

    fn commit(&mut self, kind: ChangeKind) {
        self.version += 1;
        let event = ChangeEvent {
            version: self.version,
            kind,
        };
        self.observers.notify(&event);
    }
}
