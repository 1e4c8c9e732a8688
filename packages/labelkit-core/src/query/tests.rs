use super::*;
use crate::record::{RawRecord, RecordStore};

fn store(rows: &[&[(&str, &str)]]) -> RecordStore {
    RecordStore::ingest(rows.iter().map(|pairs| {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<RawRecord>()
    }))
    .unwrap()
}

fn barcodes(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.barcode().to_string()).collect()
}

#[test]
fn test_filter_matches_any_field_case_insensitively() {
    let store = store(&[
        &[("barcode", "1"), ("title", "The Hobbit")],
        &[("barcode", "2"), ("author", "Tolkien")],
        &[("barcode", "3"), ("title", "Dune")],
    ]);

    assert_eq!(barcodes(&filter(store.records(), "HOBBIT")), vec!["1"]);
    assert_eq!(barcodes(&filter(store.records(), "tolk")), vec!["2"]);
    assert_eq!(barcodes(&filter(store.records(), "3")), vec!["3"]);
    assert_eq!(filter(store.records(), "").len(), 3);
    assert!(filter(store.records(), "missing").is_empty());
}

#[test]
fn test_sort_paginate_by_barcode() {
    let store = store(&[&[("barcode", "003")], &[("barcode", "001")], &[("barcode", "002")]]);
    let state = QueryState::default();

    let view = state.run(store.records(), 2);
    assert_eq!(barcodes(view.page_rows()), vec!["001", "002"]);

    let mut state = state;
    state.set_page(2);
    assert_eq!(barcodes(state.run(store.records(), 2).page_rows()), vec!["003"]);

    state.set_page(3);
    let view = state.run(store.records(), 2);
    assert!(view.page_rows().is_empty());
    assert_eq!(view.total_pages(), 2);
    assert_eq!(view.clamped_page(), 2);
}

#[test]
fn test_sort_is_numeric_aware() {
    let store = store(&[
        &[("barcode", "a"), ("itemcallnumber", "10 B")],
        &[("barcode", "b"), ("itemcallnumber", "9 A")],
        &[("barcode", "c"), ("itemcallnumber", "100")],
    ]);
    let mut matches = filter(store.records(), "");
    sort(&mut matches, &SortSpec::new("itemcallnumber", SortDirection::Ascending));
    assert_eq!(barcodes(&matches), vec!["b", "a", "c"]);
}

#[test]
fn test_sort_is_stable_and_absent_values_are_empty() {
    let store = store(&[
        &[("barcode", "1"), ("title", "B")],
        &[("barcode", "2")],
        &[("barcode", "3"), ("title", "A")],
        &[("barcode", "4"), ("title", "")],
        &[("barcode", "5"), ("title", "A")],
    ]);
    let mut matches = filter(store.records(), "");
    sort(&mut matches, &SortSpec::new("title", SortDirection::Ascending));
    assert_eq!(barcodes(&matches), vec!["2", "4", "3", "5", "1"]);

    sort(&mut matches, &SortSpec::new("title", SortDirection::Descending));
    assert_eq!(barcodes(&matches), vec!["1", "3", "5", "2", "4"]);
}

#[test]
fn test_request_sort_toggles_direction() {
    let mut state = QueryState::default();
    state.request_sort("barcode");
    assert_eq!(state.sort_spec().direction, SortDirection::Descending);
    state.request_sort("barcode");
    assert_eq!(state.sort_spec().direction, SortDirection::Ascending);

    state.request_sort("title");
    assert_eq!(state.sort_spec(), &SortSpec::new("title", SortDirection::Ascending));
}

#[test]
fn test_search_and_sort_reset_page() {
    let mut state = QueryState::default();
    state.set_page(4);
    state.set_search("x");
    assert_eq!(state.page(), 1);

    state.set_page(3);
    state.request_sort("author");
    assert_eq!(state.page(), 1);
}

#[test]
fn test_page_navigation_stays_in_range() {
    let mut state = QueryState::default();
    state.previous_page();
    assert_eq!(state.page(), 1);
    state.next_page(2);
    state.next_page(2);
    assert_eq!(state.page(), 2);
}

#[test]
fn test_paginate_edges() {
    let items = [1, 2, 3, 4, 5];
    assert_eq!(paginate(&items, 1, 2), &[1, 2]);
    assert_eq!(paginate(&items, 3, 2), &[5]);
    assert!(paginate(&items, 0, 2).is_empty());
    assert!(paginate(&items, 4, 2).is_empty());
    assert!(paginate(&items, usize::MAX, 2).is_empty());
    assert_eq!(total_pages(0, 52), 1);
    assert_eq!(total_pages(53, 52), 2);
}
