//! Label content transform: record plus render configuration in, renderable
//! lines and barcode payloads out.
//!
//! The transform never fails. Missing fields render as empty lines, and an
//! empty call number on a spine label renders a single placeholder line.

mod spine;

pub use spine::{call_number_lines, spine_barcode_text};

use serde::{Deserialize, Deserializer, Serialize};

use crate::record::{fields, Record};

/// Maximum number of text fields on a barcode label.
pub const MAX_LABEL_FIELDS: usize = 3;
/// Maximum barcode payload length in characters.
pub const MAX_BARCODE_LEN: usize = 16;
/// Pseudo field key rendering [`RenderConfig::custom_text`].
pub const CUSTOM_TEXT_KEY: &str = "customText";
/// Line shown on a spine label whose record has no call number.
pub const NO_CALL_NUMBER: &str = "No call number";
/// Logo used when none has been uploaded.
pub const DEFAULT_LOGO_URL: &str = "https://i.ibb.co/XrrDKnNW/ktblogo400.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelType {
    #[default]
    Barcode,
    Spine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Barcode symbology handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Symbology {
    #[default]
    #[serde(rename = "CODE128")]
    Code128,
    #[serde(rename = "QR")]
    Qr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpineBarcodePosition {
    Top,
    #[default]
    Bottom,
}

/// A field placed on a barcode label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LabelField {
    /// Value of a record field
    Record(String),
    /// The configured custom text
    CustomText,
}

impl From<String> for LabelField {
    fn from(key: String) -> Self {
        if key == CUSTOM_TEXT_KEY {
            LabelField::CustomText
        } else {
            LabelField::Record(key)
        }
    }
}

impl From<&str> for LabelField {
    fn from(key: &str) -> Self {
        LabelField::from(key.to_string())
    }
}

impl From<LabelField> for String {
    fn from(field: LabelField) -> Self {
        field.key().to_string()
    }
}

impl LabelField {
    pub fn key(&self) -> &str {
        match self {
            LabelField::Record(key) => key,
            LabelField::CustomText => CUSTOM_TEXT_KEY,
        }
    }
}

/// Logo reference passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "source")]
pub enum Logo {
    /// The bundled institution logo
    Default,
    /// A user-supplied image URL or data URI
    Custom(String),
}

impl Logo {
    pub fn source(&self) -> &str {
        match self {
            Logo::Default => DEFAULT_LOGO_URL,
            Logo::Custom(source) => source,
        }
    }
}

/// Rendering options chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub label_type: LabelType,
    #[serde(deserialize_with = "capped_fields")]
    label_fields: Vec<LabelField>,
    pub custom_text: String,
    pub text_align: TextAlign,
    pub font_family: String,
    /// Font size in points
    pub font_size: f32,
    pub first_line_bold: bool,
    pub logo: Option<Logo>,
    pub logo_size_mm: f32,
    pub symbology: Symbology,
    pub show_spine_barcode: bool,
    pub spine_barcode_position: SpineBarcodePosition,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            label_type: LabelType::Barcode,
            label_fields: vec![
                LabelField::from(fields::CALL_NUMBER),
                LabelField::from(fields::TITLE),
            ],
            custom_text: String::new(),
            text_align: TextAlign::Left,
            font_family: "sans-serif".to_string(),
            font_size: 8.0,
            first_line_bold: true,
            logo: Some(Logo::Default),
            logo_size_mm: 7.0,
            symbology: Symbology::Code128,
            show_spine_barcode: false,
            spine_barcode_position: SpineBarcodePosition::Bottom,
        }
    }
}

impl RenderConfig {
    /// Switches label type and applies that type's alignment and font size.
    pub fn set_label_type(&mut self, label_type: LabelType) {
        self.label_type = label_type;
        match label_type {
            LabelType::Spine => {
                self.text_align = TextAlign::Center;
                self.font_size = 12.0;
            }
            LabelType::Barcode => {
                self.text_align = TextAlign::Left;
                self.font_size = 8.0;
            }
        }
    }

    /// Fields shown on barcode labels, in order.
    pub fn label_fields(&self) -> &[LabelField] {
        &self.label_fields
    }

    /// Replaces the field list, keeping at most [`MAX_LABEL_FIELDS`].
    pub fn set_label_fields<I, F>(&mut self, fields: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<LabelField>,
    {
        self.label_fields = fields
            .into_iter()
            .map(Into::into)
            .take(MAX_LABEL_FIELDS)
            .collect();
    }

    /// Adds or removes one field. Adding past the cap or adding a field
    /// already present is ignored. Returns whether the list changed.
    pub fn toggle_field(&mut self, field: impl Into<LabelField>, enabled: bool) -> bool {
        let field = field.into();
        if enabled {
            if self.label_fields.len() >= MAX_LABEL_FIELDS || self.label_fields.contains(&field) {
                return false;
            }
            self.label_fields.push(field);
            true
        } else {
            let before = self.label_fields.len();
            self.label_fields.retain(|f| *f != field);
            before != self.label_fields.len()
        }
    }
}

// Stored configs may list more fields than a label can show.
fn capped_fields<'de, D>(deserializer: D) -> Result<Vec<LabelField>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut fields = Vec::<LabelField>::deserialize(deserializer)?;
    fields.truncate(MAX_LABEL_FIELDS);
    Ok(fields)
}

/// One rendered text line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelLine {
    pub text: String,
    pub bold: bool,
    /// Stand-in text rather than record data
    pub placeholder: bool,
}

impl LabelLine {
    fn text(text: impl Into<String>, bold: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            placeholder: false,
        }
    }

    fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            placeholder: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodePayload {
    pub value: String,
    pub symbology: Symbology,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpineBarcode {
    pub text: String,
    pub position: SpineBarcodePosition,
}

/// Typography and logo settings carried with each label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    pub text_align: TextAlign,
    pub font_family: String,
    pub font_size: f32,
    pub logo: Option<String>,
    pub logo_size_mm: f32,
}

/// Renderable content for one label slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelContent {
    pub label_type: LabelType,
    pub lines: Vec<LabelLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<BarcodePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spine_barcode: Option<SpineBarcode>,
    pub style: LabelStyle,
}

/// First [`MAX_BARCODE_LEN`] characters of `barcode`.
pub fn barcode_payload(barcode: &str) -> &str {
    match barcode.char_indices().nth(MAX_BARCODE_LEN) {
        Some((end, _)) => &barcode[..end],
        None => barcode,
    }
}

/// Builds the label content for `record`.
pub fn render(record: &Record, config: &RenderConfig) -> LabelContent {
    match config.label_type {
        LabelType::Barcode => render_barcode(record, config, false),
        LabelType::Spine => render_spine(record, config),
    }
}

/// Builds a label from sample data; empty barcode-label lines show their
/// field key in brackets.
pub fn preview(config: &RenderConfig) -> LabelContent {
    let record = sample_record();
    match config.label_type {
        LabelType::Barcode => render_barcode(&record, config, true),
        LabelType::Spine => render_spine(&record, config),
    }
}

fn sample_record() -> Record {
    let sample = [
        (fields::BARCODE, "111000000072"),
        (fields::TITLE, "Sample Title"),
        (fields::AUTHOR, "Author Name"),
        (fields::CALL_NUMBER, "398.27 GRİ 2005"),
        (fields::LOCATION, "General Collection"),
    ];
    Record::from_fields(
        sample
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn style(config: &RenderConfig, with_logo: bool) -> LabelStyle {
    LabelStyle {
        text_align: config.text_align,
        font_family: config.font_family.clone(),
        font_size: config.font_size,
        logo: if with_logo {
            config.logo.as_ref().map(|logo| logo.source().to_string())
        } else {
            None
        },
        logo_size_mm: config.logo_size_mm,
    }
}

fn render_barcode(record: &Record, config: &RenderConfig, preview: bool) -> LabelContent {
    let lines = config
        .label_fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let text = match field {
                LabelField::CustomText => config.custom_text.as_str(),
                LabelField::Record(key) => record.field_or_empty(key),
            };
            if preview && text.is_empty() {
                return LabelLine::placeholder(format!("[{}]", field.key()));
            }
            LabelLine::text(text, index == 0 && config.first_line_bold)
        })
        .collect();

    LabelContent {
        label_type: LabelType::Barcode,
        lines,
        barcode: Some(BarcodePayload {
            value: barcode_payload(record.barcode()).to_string(),
            symbology: config.symbology,
        }),
        spine_barcode: None,
        style: style(config, true),
    }
}

fn render_spine(record: &Record, config: &RenderConfig) -> LabelContent {
    let tokens = call_number_lines(record.field_or_empty(fields::CALL_NUMBER));
    let lines = if tokens.is_empty() {
        vec![LabelLine::placeholder(NO_CALL_NUMBER)]
    } else {
        tokens
            .into_iter()
            .map(|token| LabelLine::text(token, true))
            .collect()
    };

    let spine_barcode = if config.show_spine_barcode {
        Some(spine_barcode_text(record.barcode()))
            .filter(|text| !text.is_empty())
            .map(|text| SpineBarcode {
                text,
                position: config.spine_barcode_position,
            })
    } else {
        None
    };

    LabelContent {
        label_type: LabelType::Spine,
        lines,
        barcode: None,
        spine_barcode,
        style: style(config, false),
    }
}
