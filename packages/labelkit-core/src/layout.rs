//! Page assembly: selected records placed into a fixed grid of slots.

use serde::Serialize;

use crate::geometry::{GeometryModel, SlotPosition};
use crate::label::{self, LabelContent, RenderConfig};
use crate::query::collate;
use crate::record::{Record, RecordStore, SelectionSet};

/// One grid cell, holding a record or left empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<'a> {
    pub position: SlotPosition,
    pub record: Option<&'a Record>,
}

/// One grid cell with its label content, ready for the renderer.
/// Empty slots are drawn as blank bordered cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSlot {
    #[serde(flatten)]
    pub position: SlotPosition,
    pub content: Option<LabelContent>,
}

/// Selected records that exist in `store`, barcode ascending.
///
/// Independent of the browsing sort. Stale selection members are skipped.
pub fn print_order<'a>(store: &'a RecordStore, selection: &SelectionSet) -> Vec<&'a Record> {
    let mut records: Vec<&Record> = store
        .records()
        .iter()
        .filter(|r| selection.contains(r.barcode()))
        .collect();
    records.sort_by(|a, b| collate::compare_natural(a.barcode(), b.barcode()));
    records
}

/// Lays `records` into exactly one page of slots.
///
/// Slot `i` holds `records[i]` while records last; remaining slots are
/// empty. Records beyond the page capacity are not placed.
pub fn assemble_page<'a>(records: &[&'a Record], geometry: &GeometryModel) -> Vec<Slot<'a>> {
    let capacity = geometry.slots_per_page();
    if records.len() > capacity {
        tracing::warn!(
            "{} selected labels exceed page capacity {}; {} not placed",
            records.len(),
            capacity,
            records.len() - capacity
        );
    }
    fill_page(records, geometry)
}

/// Lays `records` across as many pages as needed, at least one.
pub fn assemble_pages<'a>(records: &[&'a Record], geometry: &GeometryModel) -> Vec<Vec<Slot<'a>>> {
    let capacity = geometry.slots_per_page();
    if records.is_empty() {
        return vec![fill_page(&[], geometry)];
    }
    records
        .chunks(capacity)
        .map(|chunk| fill_page(chunk, geometry))
        .collect()
}

fn fill_page<'a>(records: &[&'a Record], geometry: &GeometryModel) -> Vec<Slot<'a>> {
    (0..geometry.slots_per_page())
        .map(|i| Slot {
            position: geometry.slot_position(i),
            record: records.get(i).copied(),
        })
        .collect()
}

/// Transforms every occupied slot into label content.
pub fn render_page(slots: &[Slot<'_>], config: &RenderConfig) -> Vec<RenderedSlot> {
    slots
        .iter()
        .map(|slot| RenderedSlot {
            position: slot.position,
            content: slot.record.map(|record| label::render(record, config)),
        })
        .collect()
}
