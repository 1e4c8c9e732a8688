//! Label engine configuration.

use std::path::PathBuf;

/// How selected labels are laid out across physical pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintFlow {
    /// Only the first page's worth of selected labels is laid out
    #[default]
    SinglePage,
    /// Selected labels flow across as many pages as needed
    MultiPage,
}

/// Label engine configuration.
#[derive(Debug, Clone)]
pub struct LabelConfig {
    /// Data directory for the file-backed store
    pub data_dir: PathBuf,
    /// Prefix applied to every store key
    pub key_prefix: String,
    /// Built-in template applied to new sessions
    pub default_template: String,
    /// Maximum retry attempts for transient I/O errors
    pub persistence_max_retries: u32,
    /// Delay between retry attempts in milliseconds
    pub persistence_retry_delay_ms: u64,
    /// Page flow used when rendering the print list
    pub print_flow: PrintFlow,
}

impl LabelConfig {
    /// Store key holding custom templates.
    pub fn templates_key(&self) -> String {
        format!("{}_customTemplates", self.key_prefix)
    }

    /// Store key holding the selected barcodes.
    pub fn selection_key(&self) -> String {
        format!("{}_selectedBarcodes", self.key_prefix)
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            key_prefix: "labelkit".to_string(),
            default_template: "system4".to_string(),
            persistence_max_retries: 3,
            persistence_retry_delay_ms: 100,
            print_flow: PrintFlow::SinglePage,
        }
    }
}
