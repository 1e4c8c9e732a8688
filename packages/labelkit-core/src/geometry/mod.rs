//! Physical page, label and grid geometry.
//!
//! A [`GeometryModel`] describes one printable sheet: page size, label
//! size, grid shape, margins and gaps. Lengths are stored in the model's
//! [`Unit`]; grid counts are signed so that out-of-range values read from
//! storage can still be represented and rejected by [`GeometryModel::validate`].

mod builtin;

pub use builtin::{builtin, builtin_keys, BUILTIN_TEMPLATES};

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// Length unit of a geometry model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Mm,
    Cm,
    In,
    Pt,
}

impl Unit {
    /// Millimetres per one unit.
    pub fn to_mm(self) -> f64 {
        match self {
            Unit::Mm => 1.0,
            Unit::Cm => 10.0,
            Unit::In => 25.4,
            Unit::Pt => 25.4 / 72.0,
        }
    }
}

/// Physical layout descriptor for one label sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryModel {
    pub page_width: f64,
    pub page_height: f64,
    #[serde(default)]
    pub unit: Unit,
    pub label_width: f64,
    pub label_height: f64,
    #[serde(default)]
    pub margin_top: f64,
    #[serde(default)]
    pub margin_left: f64,
    pub num_cols: i32,
    pub num_rows: i32,
    #[serde(default)]
    pub col_gap: f64,
    #[serde(default)]
    pub row_gap: f64,
}

/// Position of one slot within a page grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPosition {
    /// Zero-based slot index, row-major
    pub index: usize,
    pub row: usize,
    pub col: usize,
    /// Left edge of the slot, in the model's unit
    pub x: f64,
    /// Top edge of the slot, in the model's unit
    pub y: f64,
}

impl GeometryModel {
    /// Number of label slots on one page, never less than one.
    pub fn slots_per_page(&self) -> usize {
        let product = i64::from(self.num_cols) * i64::from(self.num_rows);
        product.max(1) as usize
    }

    /// Checks that page size, label size and grid counts are positive.
    pub fn validate(&self) -> Result<(), LabelError> {
        let lengths = [
            ("pageWidth", self.page_width),
            ("pageHeight", self.page_height),
            ("labelWidth", self.label_width),
            ("labelHeight", self.label_height),
        ];
        for (field, value) in lengths {
            // NaN fails this comparison as well
            if !(value > 0.0) {
                return Err(LabelError::InvalidGeometry { field, value });
            }
        }

        let counts = [("numCols", self.num_cols), ("numRows", self.num_rows)];
        for (field, value) in counts {
            if value <= 0 {
                return Err(LabelError::InvalidGeometry {
                    field,
                    value: f64::from(value),
                });
            }
        }

        Ok(())
    }

    /// Grid position and origin of slot `index`.
    pub fn slot_position(&self, index: usize) -> SlotPosition {
        let cols = self.num_cols.max(1) as usize;
        let row = index / cols;
        let col = index % cols;
        SlotPosition {
            index,
            row,
            col,
            x: self.margin_left + col as f64 * (self.label_width + self.col_gap),
            y: self.margin_top + row as f64 * (self.label_height + self.row_gap),
        }
    }

    /// Returns a copy with `edit` applied. The copy is not validated.
    pub fn with_edit(&self, edit: GeometryEdit) -> Self {
        let mut next = self.clone();
        match edit {
            GeometryEdit::PageWidth(v) => next.page_width = v,
            GeometryEdit::PageHeight(v) => next.page_height = v,
            GeometryEdit::LabelWidth(v) => next.label_width = v,
            GeometryEdit::LabelHeight(v) => next.label_height = v,
            GeometryEdit::MarginTop(v) => next.margin_top = v,
            GeometryEdit::MarginLeft(v) => next.margin_left = v,
            GeometryEdit::NumCols(v) => next.num_cols = v,
            GeometryEdit::NumRows(v) => next.num_rows = v,
            GeometryEdit::ColGap(v) => next.col_gap = v,
            GeometryEdit::RowGap(v) => next.row_gap = v,
            GeometryEdit::Unit(u) => next.unit = u,
        }
        next
    }
}

/// A single ad-hoc change to one geometry field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryEdit {
    PageWidth(f64),
    PageHeight(f64),
    LabelWidth(f64),
    LabelHeight(f64),
    MarginTop(f64),
    MarginLeft(f64),
    NumCols(i32),
    NumRows(i32),
    ColGap(f64),
    RowGap(f64),
    Unit(Unit),
}

/// Where the active geometry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometrySource {
    /// Loaded unchanged from a named template
    Template(String),
    /// Edited after loading; detached from any template
    Custom,
}

/// The geometry currently driving pagination and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveGeometry {
    model: GeometryModel,
    source: GeometrySource,
}

impl ActiveGeometry {
    /// Activates a validated model loaded from the template `name`.
    pub fn from_template(name: &str, model: GeometryModel) -> Result<Self, LabelError> {
        model.validate()?;
        Ok(Self {
            model,
            source: GeometrySource::Template(name.to_string()),
        })
    }

    pub fn model(&self) -> &GeometryModel {
        &self.model
    }

    pub fn source(&self) -> &GeometrySource {
        &self.source
    }

    /// Applies an ad-hoc edit. On failure the prior geometry is kept.
    pub fn edit(&mut self, edit: GeometryEdit) -> Result<(), LabelError> {
        let next = self.model.with_edit(edit);
        next.validate()?;
        self.model = next;
        self.source = GeometrySource::Custom;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
