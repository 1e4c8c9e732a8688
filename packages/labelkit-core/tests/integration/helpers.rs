//! Shared fixtures for integration tests.

use labelkit_core::record::RawRecord;

pub fn row(pairs: &[(&str, &str)]) -> RawRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn barcodes_only(barcodes: &[&str]) -> Vec<RawRecord> {
    barcodes.iter().map(|b| row(&[("barcode", b)])).collect()
}

/// A small catalog in the shape produced by a Koha export.
pub fn koha_catalog() -> Vec<RawRecord> {
    vec![
        row(&[
            ("barcode", "111000000072"),
            ("title", "Grimm Masalları"),
            ("author", "Grimm, Jacob"),
            ("itemcallnumber", "398.27 GRİ 2005"),
            ("isbn", "9789750719387"),
            ("location", "Çocuk"),
            ("homebranch_description", "Merkez"),
        ]),
        row(&[
            ("barcode", "111000000010"),
            ("title", "Dune"),
            ("author", "Herbert, Frank"),
            ("itemcallnumber", "813.54 HER"),
            ("location", "Yetişkin"),
        ]),
        row(&[
            ("barcode", "111000000009"),
            ("title", "Kozmos"),
            ("author", "Sagan, Carl"),
            ("itemcallnumber", "520 SAG"),
            ("location", "Yetişkin"),
        ]),
        row(&[("barcode", "111000000100"), ("title", "Untitled shelf copy")]),
    ]
}
