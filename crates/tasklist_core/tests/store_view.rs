use tasklist_core::{CollectionStore, FilterKind, StoreConfig};

fn visible_texts(store: &CollectionStore) -> Vec<String> {
    store
        .visible_records()
        .into_iter()
        .map(|record| record.text)
        .collect()
}

#[test]
fn active_filter_hides_completed_records() {
    let mut store = CollectionStore::default();
    let milk = store.add("Buy milk").unwrap();
    store.add("Walk dog").unwrap();
    store.toggle(milk.id).unwrap();

    store.set_filter(FilterKind::Active);
    assert_eq!(visible_texts(&store), vec!["Walk dog"]);

    store.set_filter(FilterKind::Completed);
    assert_eq!(visible_texts(&store), vec!["Buy milk"]);

    store.set_filter(FilterKind::All);
    assert_eq!(visible_texts(&store), vec!["Buy milk", "Walk dog"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let mut store = CollectionStore::default();
    store.add("Alpha").unwrap();
    store.add("Beta").unwrap();

    store.set_search_term("al");
    assert_eq!(visible_texts(&store), vec!["Alpha"]);

    store.set_search_term("ET");
    assert_eq!(visible_texts(&store), vec!["Beta"]);

    store.set_search_term("");
    assert_eq!(visible_texts(&store), vec!["Alpha", "Beta"]);
}

#[test]
fn filter_and_search_combine() {
    let mut store = CollectionStore::default();
    let report = store.add("Write report").unwrap();
    store.add("Review report").unwrap();
    store.add("Lunch").unwrap();
    store.toggle(report.id).unwrap();

    store.set_filter(FilterKind::Active);
    store.set_search_term("REPORT");
    assert_eq!(visible_texts(&store), vec!["Review report"]);
}

#[test]
fn duplicate_texts_keep_insertion_order() {
    let mut store = CollectionStore::default();
    let first = store.add("same").unwrap();
    let second = store.add("same").unwrap();

    store.set_search_term("sam");
    let ids: Vec<_> = store.visible_records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn visible_records_is_pure() {
    let mut store = CollectionStore::default();
    store.add("one").unwrap();
    let two = store.add("two").unwrap();
    store.toggle(two.id).unwrap();
    store.set_filter(FilterKind::Completed);
    let version = store.version();

    let first = store.visible_records();
    let second = store.visible_records();

    assert_eq!(first, second);
    assert_eq!(store.version(), version);
    assert_eq!(store.len(), 2);
}

#[test]
fn initial_filter_comes_from_config() {
    let mut store = CollectionStore::new(&StoreConfig {
        initial_filter: FilterKind::Completed,
        ..StoreConfig::default()
    });
    store.add("open").unwrap();

    assert_eq!(store.filter(), FilterKind::Completed);
    assert!(store.visible_records().is_empty());
}

#[test]
fn counts_ignore_view_state() {
    let mut store = CollectionStore::default();
    let a = store.add("a").unwrap();
    store.add("b").unwrap();
    store.toggle(a.id).unwrap();
    store.set_filter(FilterKind::Active);
    store.set_search_term("zzz");

    let counts = store.counts();
    assert_eq!(counts.total, 2);
    assert_eq!(counts.active, 1);
    assert_eq!(counts.completed, 1);
}
