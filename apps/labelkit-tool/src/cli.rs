use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding saved templates
    #[arg(long, global = true, default_value = "./data")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter, sort and page through a catalog export; loading records
    /// clears earlier selections
    Browse {
        #[command(flatten)]
        records: RecordsArgs,

        /// Case-insensitive search over every field
        #[arg(short, long, default_value = "")]
        search: String,

        /// Field to sort by
        #[arg(long, default_value = "barcode")]
        sort: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Template whose slot count sets the page size
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Select records and lay them out on label sheets; loading records
    /// clears earlier selections, so selection does not carry across runs
    Print {
        #[command(flatten)]
        records: RecordsArgs,

        #[command(flatten)]
        select: SelectArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// Template to print on
        #[arg(short, long)]
        template: Option<String>,

        /// Flow labels across as many pages as needed
        #[arg(long)]
        multi_page: bool,
    },

    /// Render one label from sample data
    Preview {
        #[command(flatten)]
        render: RenderArgs,
    },

    /// Manage sheet templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List built-in and saved templates
    List,

    /// Save a template derived from an existing one
    Save {
        /// Name to save under
        name: String,

        /// Template to start from
        #[arg(long, default_value = "system4")]
        base: String,

        #[command(flatten)]
        geometry: GeometryArgs,
    },

    /// Delete a saved template
    Delete {
        /// Name of the template
        name: String,
    },
}

#[derive(Args)]
pub struct RecordsArgs {
    /// JSON file holding an array of record objects
    #[arg(short, long)]
    pub records: PathBuf,
}

#[derive(Args)]
pub struct SelectArgs {
    /// Select every record
    #[arg(long)]
    pub all: bool,

    /// Select barcodes in an inclusive range
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub range: Option<Vec<String>>,

    /// Select records at a location
    #[arg(long)]
    pub location: Option<String>,

    /// Select records whose call number starts with a prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Select individual barcodes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub barcodes: Vec<String>,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Label type to render
    #[arg(long, value_enum, default_value_t = LabelKind::Barcode)]
    pub label_type: LabelKind,

    /// Fields shown on barcode labels (comma-separated, at most 3)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Text for the customText field
    #[arg(long, default_value = "")]
    pub custom_text: String,

    /// Barcode symbology
    #[arg(long, value_enum, default_value_t = SymbologyKind::Code128)]
    pub symbology: SymbologyKind,

    /// Show the shortened barcode on spine labels
    #[arg(long)]
    pub spine_barcode: bool,

    /// Draw the spine barcode above the call number
    #[arg(long)]
    pub spine_barcode_top: bool,

    /// Logo image URL or data URI
    #[arg(long)]
    pub logo: Option<String>,

    /// Omit the logo
    #[arg(long, conflicts_with = "logo")]
    pub no_logo: bool,
}

#[derive(Args)]
pub struct GeometryArgs {
    #[arg(long)]
    pub label_width: Option<f64>,
    #[arg(long)]
    pub label_height: Option<f64>,
    #[arg(long)]
    pub margin_top: Option<f64>,
    #[arg(long)]
    pub margin_left: Option<f64>,
    #[arg(long)]
    pub cols: Option<i32>,
    #[arg(long)]
    pub rows: Option<i32>,
    #[arg(long)]
    pub col_gap: Option<f64>,
    #[arg(long)]
    pub row_gap: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LabelKind {
    Barcode,
    Spine,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SymbologyKind {
    Code128,
    Qr,
}
