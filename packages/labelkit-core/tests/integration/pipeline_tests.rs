//! Query pipeline and print layout, driven through a session.

use std::sync::Arc;

use labelkit_core::config::LabelConfig;
use labelkit_core::geometry::GeometryEdit;
use labelkit_core::label::{LabelType, SpineBarcodePosition, Symbology, NO_CALL_NUMBER};
use labelkit_core::persistence::MemoryStore;
use labelkit_core::query::{SortDirection, SortSpec};
use labelkit_core::Session;

use super::helpers::{barcodes_only, koha_catalog};

fn session() -> Session {
    Session::open(LabelConfig::default(), Arc::new(MemoryStore::new())).unwrap()
}

fn page_barcodes(session: &Session) -> Vec<String> {
    session
        .view()
        .page_rows()
        .iter()
        .map(|r| r.barcode().to_string())
        .collect()
}

#[test]
fn test_sorted_pages_of_two() {
    let mut session = session();
    session.ingest(barcodes_only(&["003", "001", "002"])).unwrap();
    session.edit_geometry(GeometryEdit::NumCols(2)).unwrap();
    session.edit_geometry(GeometryEdit::NumRows(1)).unwrap();
    session.set_sort(SortSpec::new("barcode", SortDirection::Ascending));

    assert_eq!(page_barcodes(&session), vec!["001", "002"]);
    session.set_page(2);
    assert_eq!(page_barcodes(&session), vec!["003"]);
    session.set_page(3);
    assert!(page_barcodes(&session).is_empty());
}

#[test]
fn test_range_selection_is_exact() {
    let mut session = session();
    session
        .ingest(barcodes_only(&["001", "002", "003", "004"]))
        .unwrap();
    session.select_by_range("002", "003").unwrap();

    let selected: Vec<&str> = session.selection().iter().collect();
    assert_eq!(selected, vec!["002", "003"]);
}

#[test]
fn test_repeated_selection_is_idempotent() {
    let mut session = session();
    session.ingest(koha_catalog()).unwrap();
    let batch = ["111000000072", "111000000010"];

    assert_eq!(session.update_selection(batch, true).unwrap(), 2);
    let snapshot = session.selection().clone();
    assert_eq!(session.update_selection(batch, true).unwrap(), 0);
    assert_eq!(session.selection(), &snapshot);
}

#[test]
fn test_print_layout_sorted_by_barcode_not_title() {
    let mut session = session();
    session.ingest(koha_catalog()).unwrap();
    session.select_filtered(true).unwrap();
    session.set_sort(SortSpec::new("title", SortDirection::Descending));

    let pages = session.print_pages();
    let printed: Vec<&str> = pages[0]
        .iter()
        .filter_map(|slot| slot.record.map(|r| r.barcode()))
        .collect();
    assert_eq!(
        printed,
        vec!["111000000009", "111000000010", "111000000072", "111000000100"]
    );
    assert_eq!(pages[0].len(), 52);
}

#[test]
fn test_spine_sheet_end_to_end() {
    let mut session = session();
    session.ingest(koha_catalog()).unwrap();
    session.apply_template("spine_system").unwrap();
    session.select_by_location("Çocuk").unwrap();
    session.update_selection(["111000000100"], true).unwrap();

    let config = session.render_config_mut();
    config.set_label_type(LabelType::Spine);
    config.show_spine_barcode = true;
    config.spine_barcode_position = SpineBarcodePosition::Top;

    let pages = session.render_print();
    assert_eq!(pages[0].len(), 40);

    let grimm = pages[0][0].content.as_ref().unwrap();
    let lines: Vec<&str> = grimm.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(lines, vec!["398.27", "GRİ", "2005"]);
    assert_eq!(grimm.spine_barcode.as_ref().unwrap().text, "[72]");

    let shelf_copy = pages[0][1].content.as_ref().unwrap();
    assert_eq!(shelf_copy.lines[0].text, NO_CALL_NUMBER);
    assert_eq!(shelf_copy.spine_barcode.as_ref().unwrap().text, "[100]");
    assert!(pages[0][2].content.is_none());
}

#[test]
fn test_barcode_sheet_json_handoff() {
    let mut session = session();
    session.ingest(koha_catalog()).unwrap();
    session.update_selection(["111000000010"], true).unwrap();
    let config = session.render_config_mut();
    config.symbology = Symbology::Qr;
    config.set_label_fields(["title", "author", "customText"]);
    config.custom_text = "Merkez Kütüphane".to_string();

    let json = serde_json::to_value(session.render_print()).unwrap();
    let slot = &json[0][0];
    assert_eq!(slot["index"], 0);
    assert_eq!(slot["x"], 7.0);
    assert_eq!(slot["content"]["barcode"]["symbology"], "QR");
    assert_eq!(slot["content"]["lines"][0]["text"], "Dune");
    assert_eq!(slot["content"]["lines"][0]["bold"], true);
    assert_eq!(slot["content"]["lines"][2]["text"], "Merkez Kütüphane");
    assert!(json[0][1]["content"].is_null());
}

#[test]
fn test_search_then_sort_resets_to_first_page() {
    let mut session = session();
    session.ingest(koha_catalog()).unwrap();
    session.edit_geometry(GeometryEdit::NumRows(1)).unwrap();
    session.edit_geometry(GeometryEdit::NumCols(1)).unwrap();
    session.set_page(3);

    session.set_search("yetişkin");
    assert_eq!(session.query().page(), 1);
    assert_eq!(session.view().total_pages(), 2);

    session.next_page();
    session.request_sort("title");
    assert_eq!(session.query().page(), 1);
    assert_eq!(page_barcodes(&session), vec!["111000000010"]);
}
