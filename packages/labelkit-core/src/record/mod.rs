//! Catalog records, the record store, and the persistent selection set.

mod selection;

pub use selection::{
    call_number_prefix_batch, location_batch, range_batch, SelectionSet, DEWEY_CLASSES,
};

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::LabelError;
use crate::query::collate;

/// Recognized record field keys.
pub mod fields {
    pub const BARCODE: &str = "barcode";
    pub const TITLE: &str = "title";
    pub const AUTHOR: &str = "author";
    pub const CALL_NUMBER: &str = "itemcallnumber";
    pub const ISBN: &str = "isbn";
    pub const HOME_BRANCH: &str = "homebranch_description";
    pub const LOCATION: &str = "location";
    pub const SHELF_NOTE: &str = "raf_kontrol_notu";
    pub const ITEM_TYPE: &str = "itemtype";

    /// Keys that can be placed on a barcode label.
    pub const LABEL_FIELDS: [&str; 7] = [
        CALL_NUMBER,
        TITLE,
        ISBN,
        AUTHOR,
        HOME_BRANCH,
        LOCATION,
        SHELF_NOTE,
    ];
}

/// Raw key/value row as delivered by the ingestion collaborator.
pub type RawRecord = BTreeMap<String, String>;

/// One catalog item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Builds a record from a raw row, trimming keys and the barcode.
    ///
    /// Returns `None` when the row has no non-empty `barcode`.
    pub fn from_raw(raw: RawRecord) -> Option<Self> {
        let mut fields: BTreeMap<String, String> = raw
            .into_iter()
            .map(|(key, value)| (key.trim().to_string(), value))
            .collect();

        let barcode = fields.get(fields::BARCODE)?.trim().to_string();
        if barcode.is_empty() {
            return None;
        }
        fields.insert(fields::BARCODE.to_string(), barcode);
        Some(Self { fields })
    }

    /// Wraps fields that are known to carry a trimmed, non-empty barcode.
    pub(crate) fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// The record's unique identifier.
    pub fn barcode(&self) -> &str {
        self.fields
            .get(fields::BARCODE)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field value, or the empty string when absent.
    pub fn field_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

/// Holds the records of the most recent ingestion.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    /// Builds a new store from raw rows.
    ///
    /// Rows without a barcode are skipped; later rows repeating an earlier
    /// barcode are dropped.
    pub fn ingest<I>(raw_records: I) -> Result<Self, LabelError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut store = RecordStore::default();
        let mut skipped = 0usize;
        let mut duplicates = 0usize;

        for raw in raw_records {
            let Some(record) = Record::from_raw(raw) else {
                skipped += 1;
                continue;
            };
            if store.index.contains_key(record.barcode()) {
                duplicates += 1;
                continue;
            }
            store
                .index
                .insert(record.barcode().to_string(), store.records.len());
            store.records.push(record);
        }

        if duplicates > 0 {
            tracing::warn!("Dropped {} records with duplicate barcodes", duplicates);
        }
        if store.records.is_empty() {
            return Err(LabelError::EmptyOrInvalidDataset);
        }

        tracing::info!(
            "Ingested {} records ({} rows without barcode skipped)",
            store.records.len(),
            skipped
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ingestion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn all_barcodes(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::barcode)
    }

    pub fn by_barcode(&self, barcode: &str) -> Option<&Record> {
        self.index.get(barcode).map(|&i| &self.records[i])
    }

    /// Distinct non-empty `location` values, sorted.
    pub fn unique_locations(&self) -> Vec<&str> {
        let mut locations: Vec<&str> = self
            .records
            .iter()
            .filter_map(|r| r.get(fields::LOCATION))
            .filter(|loc| !loc.is_empty())
            .collect();
        locations.sort_by(|a, b| collate::compare_text(a, b));
        locations.dedup();
        locations
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
