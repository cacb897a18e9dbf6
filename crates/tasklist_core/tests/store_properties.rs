use proptest::prelude::*;
use std::collections::HashSet;
use tasklist_core::{
    CollectionStore, FilterKind, IdStrategy, Priority, RecordId, StoreConfig, StoreError,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Toggle(usize),
    Remove(usize),
    BulkRemove(Vec<usize>),
    BeginEdit(usize),
    CommitEdit(usize, String),
    CancelEdit(usize),
    SetPriority(usize, Option<Priority>),
    ToggleSelect(usize),
    ClearSelection,
    SelectAllVisible,
    RemoveSelected,
    ToggleAll,
    ClearCompleted,
    Move(usize, usize),
    SetFilter(FilterKind),
    SetSearch(String),
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[A-Za-z ]{1,12}",
        1 => Just(String::new()),
        1 => Just("   ".to_string()),
    ]
}

fn arb_filter() -> impl Strategy<Value = FilterKind> {
    prop_oneof![
        Just(FilterKind::All),
        Just(FilterKind::Active),
        Just(FilterKind::Completed),
    ]
}

fn arb_priority() -> impl Strategy<Value = Option<Priority>> {
    prop_oneof![
        Just(None),
        Just(Some(Priority::Low)),
        Just(Some(Priority::Medium)),
        Just(Some(Priority::High)),
    ]
}

// Indices past the collection length stand for ids that do not exist.
fn arb_op() -> impl Strategy<Value = Op> {
    let slot = 0usize..8;
    prop_oneof![
        4 => arb_text().prop_map(Op::Add),
        2 => slot.clone().prop_map(Op::Toggle),
        1 => slot.clone().prop_map(Op::Remove),
        2 => slot.clone().prop_map(Op::BeginEdit),
        2 => (slot.clone(), arb_text()).prop_map(|(i, t)| Op::CommitEdit(i, t)),
        1 => slot.clone().prop_map(Op::CancelEdit),
        1 => (slot.clone(), arb_priority()).prop_map(|(i, p)| Op::SetPriority(i, p)),
        2 => slot.prop_map(Op::ToggleSelect),
        4 => arb_bulk_op(),
        2 => arb_view_op(),
    ]
}

fn arb_bulk_op() -> impl Strategy<Value = Op> {
    let slot = 0usize..8;
    prop_oneof![
        prop::collection::vec(slot.clone(), 0..4).prop_map(Op::BulkRemove),
        Just(Op::ClearSelection),
        Just(Op::SelectAllVisible),
        Just(Op::RemoveSelected),
        Just(Op::ToggleAll),
        Just(Op::ClearCompleted),
        (slot.clone(), slot).prop_map(|(i, to)| Op::Move(i, to)),
    ]
}

fn arb_view_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_filter().prop_map(Op::SetFilter),
        "[a-z]{0,2}".prop_map(Op::SetSearch),
    ]
}

fn sequential_store() -> CollectionStore {
    CollectionStore::new(&StoreConfig {
        id_strategy: IdStrategy::Sequential,
        ..StoreConfig::default()
    })
}

fn resolve(store: &CollectionStore, slot: usize) -> RecordId {
    store
        .records()
        .get(slot)
        .map(|record| record.id)
        .unwrap_or_else(|| Uuid::from_u128(u128::MAX - slot as u128))
}

fn apply(store: &mut CollectionStore, op: &Op) {
    // Errors are expected for blank text and unknown ids.
    let _ = match op {
        Op::Add(text) => store.add(text).map(|_| ()),
        Op::Toggle(i) => {
            let id = resolve(store, *i);
            store.toggle(id)
        }
        Op::Remove(i) => {
            let id = resolve(store, *i);
            store.remove(id)
        }
        Op::BulkRemove(slots) => {
            let ids: Vec<_> = slots.iter().map(|i| resolve(store, *i)).collect();
            store.bulk_remove(ids);
            Ok(())
        }
        Op::BeginEdit(i) => {
            let id = resolve(store, *i);
            store.begin_edit(id)
        }
        Op::CommitEdit(i, text) => {
            let id = resolve(store, *i);
            store.commit_edit(id, text)
        }
        Op::CancelEdit(i) => {
            let id = resolve(store, *i);
            store.cancel_edit(id)
        }
        Op::SetPriority(i, p) => {
            let id = resolve(store, *i);
            store.set_priority(id, *p)
        }
        Op::ToggleSelect(i) => {
            let id = resolve(store, *i);
            store.toggle_select(id).map(|_| ())
        }
        Op::ClearSelection => {
            store.clear_selection();
            Ok(())
        }
        Op::SelectAllVisible => {
            store.select_all_visible();
            Ok(())
        }
        Op::RemoveSelected => {
            store.remove_selected();
            Ok(())
        }
        Op::ToggleAll => {
            store.toggle_all();
            Ok(())
        }
        Op::ClearCompleted => {
            store.clear_completed();
            Ok(())
        }
        Op::Move(i, to) => {
            let id = resolve(store, *i);
            store.move_record(id, *to)
        }
        Op::SetFilter(kind) => {
            store.set_filter(*kind);
            Ok(())
        }
        Op::SetSearch(term) => {
            store.set_search_term(term.as_str());
            Ok(())
        }
    };
}

fn assert_invariants(store: &CollectionStore) -> Result<(), TestCaseError> {
    let ids: HashSet<RecordId> = store.records().iter().map(|r| r.id).collect();
    prop_assert_eq!(ids.len(), store.len());

    let editing = store.records().iter().filter(|r| r.editing).count();
    prop_assert!(editing <= 1);

    for selected in store.selected_ids() {
        prop_assert!(ids.contains(&selected));
    }
    for record in store.records() {
        prop_assert!(!record.text.trim().is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invariants_hold_after_any_sequence(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut store = sequential_store();
        for op in &ops {
            apply(&mut store, op);
            assert_invariants(&store)?;
        }
    }

    #[test]
    fn add_grows_by_one_with_fresh_id(
        ops in prop::collection::vec(arb_op(), 0..30),
        text in "[A-Za-z]{1,10}",
    ) {
        let mut store = sequential_store();
        for op in &ops {
            apply(&mut store, op);
        }
        let before: HashSet<RecordId> = store.records().iter().map(|r| r.id).collect();
        let len = store.len();

        let record = store.add(&text).unwrap();

        prop_assert_eq!(store.len(), len + 1);
        prop_assert!(!before.contains(&record.id));
    }

    #[test]
    fn missing_ids_fail_without_changes(ops in prop::collection::vec(arb_op(), 0..30)) {
        let mut store = sequential_store();
        for op in &ops {
            apply(&mut store, op);
        }
        let missing = Uuid::new_v4();
        let before = store.snapshot();

        prop_assert_eq!(store.toggle(missing), Err(StoreError::NotFound(missing)));
        prop_assert_eq!(store.remove(missing), Err(StoreError::NotFound(missing)));
        prop_assert_eq!(store.commit_edit(missing, "x"), Err(StoreError::NotFound(missing)));

        let after = store.snapshot();
        prop_assert!(before.same_collection(&after));
        prop_assert_eq!(before.version, after.version);
    }

    #[test]
    fn bulk_remove_is_idempotent(
        ops in prop::collection::vec(arb_op(), 0..30),
        slots in prop::collection::vec(0usize..8, 0..5),
    ) {
        let mut store = sequential_store();
        for op in &ops {
            apply(&mut store, op);
        }
        let ids: Vec<_> = slots.iter().map(|i| resolve(&store, *i)).collect();

        store.bulk_remove(ids.clone());
        let once: Vec<_> = store.records().iter().map(|r| r.as_ref().clone()).collect();
        store.bulk_remove(ids);
        let twice: Vec<_> = store.records().iter().map(|r| r.as_ref().clone()).collect();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn visible_records_is_deterministic(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = sequential_store();
        for op in &ops {
            apply(&mut store, op);
        }
        let first = store.visible_records();
        let second = store.visible_records();
        prop_assert_eq!(&first, &second);

        let term = store.search_term().to_lowercase();
        for record in &first {
            prop_assert!(store.filter().matches(record));
            prop_assert!(record.text.to_lowercase().contains(&term));
        }
    }
}
