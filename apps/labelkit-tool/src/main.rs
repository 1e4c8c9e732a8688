//! CLI tool for catalog label sheets.
//!
//! Provides commands for:
//! - Browsing a catalog export with search, sort and paging
//! - Selecting records and laying them out on a sheet template
//! - Previewing label content and managing saved templates

mod cli;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};

use cli::{
    Cli, Commands, GeometryArgs, LabelKind, RenderArgs, SelectArgs, SymbologyKind,
    TemplateCommands,
};
use labelkit_core::config::{LabelConfig, PrintFlow};
use labelkit_core::geometry::GeometryEdit;
use labelkit_core::label::{self, LabelType, Logo, RenderConfig, SpineBarcodePosition, Symbology};
use labelkit_core::persistence::{FileStore, KeyValueStore};
use labelkit_core::query::{SortDirection, SortSpec};
use labelkit_core::record::RawRecord;
use labelkit_core::Session;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let output = run(cli)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(cli: Cli) -> Result<Value> {
    match cli.command {
        Commands::Browse {
            records,
            search,
            sort,
            desc,
            page,
            template,
        } => {
            let mut session = open_session(&cli.data_dir, PrintFlow::SinglePage)?;
            if let Some(name) = template {
                session.apply_template(&name)?;
            }
            session.ingest(read_records(&records.records)?)?;

            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            session.set_search(search);
            session.set_sort(SortSpec::new(sort, direction));
            session.set_page(page);

            let view = session.view();
            Ok(json!({
                "page": view.clamped_page(),
                "totalPages": view.total_pages(),
                "matches": view.matches().len(),
                "rows": view.page_rows(),
            }))
        }

        Commands::Print {
            records,
            select,
            render,
            template,
            multi_page,
        } => {
            let flow = if multi_page {
                PrintFlow::MultiPage
            } else {
                PrintFlow::SinglePage
            };
            let mut session = open_session(&cli.data_dir, flow)?;
            if let Some(name) = template {
                session.apply_template(&name)?;
            }
            session.ingest(read_records(&records.records)?)?;
            apply_selection(&mut session, &select)?;
            *session.render_config_mut() = render_config(&render);

            tracing::info!(
                "Printing {} labels on {:?}",
                session.print_list().len(),
                session.geometry().source()
            );
            Ok(serde_json::to_value(session.render_print())?)
        }

        Commands::Preview { render } => {
            let content = label::preview(&render_config(&render));
            Ok(serde_json::to_value(content)?)
        }

        Commands::Templates { command } => {
            let mut session = open_session(&cli.data_dir, PrintFlow::SinglePage)?;
            match command {
                TemplateCommands::List => {}
                TemplateCommands::Save {
                    name,
                    base,
                    geometry,
                } => {
                    session.apply_template(&base)?;
                    for edit in geometry_edits(&geometry) {
                        session
                            .edit_geometry(edit)
                            .with_context(|| format!("Invalid geometry for template '{}'", name))?;
                    }
                    session.save_template(&name)?;
                }
                TemplateCommands::Delete { name } => session.delete_template(&name)?,
            }
            Ok(serde_json::to_value(session.templates().list())?)
        }
    }
}

fn open_session(data_dir: &Path, print_flow: PrintFlow) -> Result<Session> {
    let config = LabelConfig {
        data_dir: data_dir.to_path_buf(),
        print_flow,
        ..Default::default()
    };
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config));
    Ok(Session::open(config, store)?)
}

/// Reads a JSON array of flat objects. Scalar values become strings and
/// nulls are dropped.
fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))?;
    raw_records(value)
}

fn raw_records(value: Value) -> Result<Vec<RawRecord>> {
    let Value::Array(rows) = value else {
        bail!("Expected a JSON array of record objects");
    };

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let Value::Object(object) = row else {
            bail!("Record {} is not a JSON object", i);
        };
        let raw: RawRecord = object
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect();
        records.push(raw);
    }
    Ok(records)
}

fn apply_selection(session: &mut Session, args: &SelectArgs) -> Result<()> {
    if args.all {
        session.select_filtered(true)?;
    }
    if let Some([start, end]) = args.range.as_deref() {
        session.select_by_range(start, end)?;
    }
    if let Some(location) = &args.location {
        session.select_by_location(location)?;
    }
    if let Some(prefix) = &args.prefix {
        session.select_by_call_number_prefix(prefix)?;
    }
    if !args.barcodes.is_empty() {
        session.update_selection(&args.barcodes, true)?;
    }

    let stale = session.selection().stale_count(session.records());
    if stale > 0 {
        tracing::warn!("{} selected barcodes match no record", stale);
    }
    Ok(())
}

fn render_config(args: &RenderArgs) -> RenderConfig {
    let mut config = RenderConfig::default();
    config.set_label_type(match args.label_type {
        LabelKind::Barcode => LabelType::Barcode,
        LabelKind::Spine => LabelType::Spine,
    });
    if !args.fields.is_empty() {
        config.set_label_fields(args.fields.iter().map(String::as_str));
    }
    config.custom_text = args.custom_text.clone();
    config.symbology = match args.symbology {
        SymbologyKind::Code128 => Symbology::Code128,
        SymbologyKind::Qr => Symbology::Qr,
    };
    config.show_spine_barcode = args.spine_barcode;
    if args.spine_barcode_top {
        config.spine_barcode_position = SpineBarcodePosition::Top;
    }
    if let Some(source) = &args.logo {
        config.logo = Some(Logo::Custom(source.clone()));
    } else if args.no_logo {
        config.logo = None;
    }
    config
}

fn geometry_edits(args: &GeometryArgs) -> Vec<GeometryEdit> {
    [
        args.label_width.map(GeometryEdit::LabelWidth),
        args.label_height.map(GeometryEdit::LabelHeight),
        args.margin_top.map(GeometryEdit::MarginTop),
        args.margin_left.map(GeometryEdit::MarginLeft),
        args.cols.map(GeometryEdit::NumCols),
        args.rows.map(GeometryEdit::NumRows),
        args.col_gap.map(GeometryEdit::ColGap),
        args.row_gap.map(GeometryEdit::RowGap),
    ]
    .into_iter()
    .flatten()
    .collect()
}
