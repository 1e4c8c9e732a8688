//! Persistent set of barcodes chosen for printing.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{fields, Record, RecordStore};
use crate::query::collate;

/// Dewey main classes as (call number prefix, label) for quick selection.
pub const DEWEY_CLASSES: [(&str, &str); 10] = [
    ("0", "000 - General works"),
    ("1", "100 - Philosophy & psychology"),
    ("2", "200 - Religion"),
    ("3", "300 - Social sciences"),
    ("4", "400 - Language"),
    ("5", "500 - Science & mathematics"),
    ("6", "600 - Technology"),
    ("7", "700 - Arts"),
    ("8", "800 - Literature"),
    ("9", "900 - History & geography"),
];

/// Set of selected barcodes. Members without a matching record are kept
/// and ignored at layout time. Serializes as a JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    members: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (`select == true`) or removes every barcode in `batch` as one
    /// logical update. Returns how many members changed.
    pub fn update<I, S>(&mut self, batch: I, select: bool) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut changed = 0;
        for barcode in batch {
            let barcode = barcode.as_ref();
            let hit = if select {
                self.members.insert(barcode.to_string())
            } else {
                self.members.remove(barcode)
            };
            if hit {
                changed += 1;
            }
        }
        changed
    }

    pub fn contains(&self, barcode: &str) -> bool {
        self.members.contains(barcode)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    /// Members with no record in `store`.
    pub fn stale_count(&self, store: &RecordStore) -> usize {
        self.iter()
            .filter(|barcode| store.by_barcode(barcode).is_none())
            .count()
    }
}

/// Barcodes `b` with `start <= b <= end`. Blank bounds select nothing.
pub fn range_batch<'a>(records: &'a [Record], start: &str, end: &str) -> Vec<&'a str> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .map(Record::barcode)
        .filter(|barcode| {
            collate::compare_text(barcode, start) != Ordering::Less
                && collate::compare_text(barcode, end) != Ordering::Greater
        })
        .collect()
}

/// Barcodes of records shelved at exactly `location`.
pub fn location_batch<'a>(records: &'a [Record], location: &str) -> Vec<&'a str> {
    if location.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| r.get(fields::LOCATION) == Some(location))
        .map(Record::barcode)
        .collect()
}

/// Barcodes of records whose call number starts with `prefix`.
pub fn call_number_prefix_batch<'a>(records: &'a [Record], prefix: &str) -> Vec<&'a str> {
    if prefix.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| r.field_or_empty(fields::CALL_NUMBER).starts_with(prefix))
        .map(Record::barcode)
        .collect()
}
