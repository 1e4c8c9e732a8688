//! Criterion benchmarks for the browse and print paths.
//!
//! - Filter, sort and paginate over a large catalog
//! - Page assembly and label rendering for a full sheet

use criterion::{criterion_group, criterion_main, Criterion};
use labelkit_core::geometry::builtin;
use labelkit_core::label::RenderConfig;
use labelkit_core::layout::{assemble_page, print_order, render_page};
use labelkit_core::query::{QueryState, SortDirection, SortSpec};
use labelkit_core::record::{RawRecord, RecordStore, SelectionSet};
use std::hint::black_box;

/// Builds a catalog of `count` records with varied call numbers.
fn create_catalog(count: usize) -> RecordStore {
    let rows = (0..count).map(|i| {
        let mut raw = RawRecord::new();
        raw.insert("barcode".to_string(), format!("1110{:08}", i));
        raw.insert("title".to_string(), format!("Title {}", count - i));
        raw.insert("author".to_string(), format!("Author {}", i % 97));
        raw.insert(
            "itemcallnumber".to_string(),
            format!("{}.{} AUT {}", i % 1000, i % 37, 1950 + i % 70),
        );
        raw.insert("location".to_string(), format!("Shelf {}", i % 12));
        raw
    });
    RecordStore::ingest(rows).expect("catalog is not empty")
}

/// Benchmark: search, title sort and first page over 10k records
fn benchmark_query_pipeline(c: &mut Criterion) {
    let store = create_catalog(10_000);
    let mut state = QueryState::default();
    state.set_search("shelf 7");
    state.set_sort(SortSpec::new("title", SortDirection::Descending));

    c.bench_function("query_pipeline_10k", |b| {
        b.iter(|| {
            let view = state.run(black_box(store.records()), 52);
            black_box(view.page_rows().len())
        })
    });
}

/// Benchmark: print order, one system4 sheet, rendered
fn benchmark_print_sheet(c: &mut Criterion) {
    let store = create_catalog(10_000);
    let mut selection = SelectionSet::new();
    selection.update(store.all_barcodes().step_by(150), true);
    let geometry = builtin("system4").expect("built-in template");
    let config = RenderConfig::default();

    c.bench_function("print_sheet_system4", |b| {
        b.iter(|| {
            let records = print_order(black_box(&store), black_box(&selection));
            let slots = assemble_page(&records, &geometry);
            black_box(render_page(&slots, &config))
        })
    });
}

criterion_group!(benches, benchmark_query_pipeline, benchmark_print_sheet);
criterion_main!(benches);
