//! Built-in, immutable sheet templates.

use super::{GeometryModel, Unit};

/// Built-in templates as (key, display name, geometry).
pub const BUILTIN_TEMPLATES: [(&str, &str, GeometryModel); 4] = [
    (
        "system4",
        "Barcode labels, 4 across (46x22 mm)",
        a4(46.0, 22.0, 13.0, 7.0, 4, 13, 3.0, 0.0),
    ),
    (
        "system3",
        "Barcode labels, 3 across (69x25 mm)",
        a4(69.0, 25.0, 10.0, 1.5, 3, 11, 0.0, 0.0),
    ),
    (
        "spine_system",
        "Spine labels (52x30 mm)",
        a4(52.0, 30.0, 0.0, 20.0, 4, 10, 0.0, 0.0),
    ),
    (
        "spine_sample",
        "Spine labels, sample sheet (30x50 mm)",
        a4(30.0, 50.0, 10.0, 10.0, 6, 5, 3.0, 3.0),
    ),
];

#[allow(clippy::too_many_arguments)]
const fn a4(
    label_width: f64,
    label_height: f64,
    margin_top: f64,
    margin_left: f64,
    num_cols: i32,
    num_rows: i32,
    col_gap: f64,
    row_gap: f64,
) -> GeometryModel {
    GeometryModel {
        page_width: 210.0,
        page_height: 297.0,
        unit: Unit::Mm,
        label_width,
        label_height,
        margin_top,
        margin_left,
        num_cols,
        num_rows,
        col_gap,
        row_gap,
    }
}

/// Looks up a built-in template by key.
pub fn builtin(key: &str) -> Option<GeometryModel> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, _, model)| model.clone())
}

/// Keys of all built-in templates, in declaration order.
pub fn builtin_keys() -> impl Iterator<Item = &'static str> {
    BUILTIN_TEMPLATES.iter().map(|(key, _, _)| *key)
}
