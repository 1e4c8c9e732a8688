//! Session state container wiring records, selection, query, geometry,
//! rendering options and templates together.
//!
//! All selection changes go through [`Session::update_selection`], which
//! applies a batch and writes one snapshot to the store.

use std::sync::Arc;

use crate::config::{LabelConfig, PrintFlow};
use crate::error::LabelError;
use crate::geometry::{ActiveGeometry, GeometryEdit, GeometryModel};
use crate::label::{self, LabelContent, RenderConfig};
use crate::layout::{self, RenderedSlot, Slot};
use crate::persistence::{load_json, KeyValueStore};
use crate::query::{QueryState, QueryView, SortSpec};
use crate::record::{self, RawRecord, Record, RecordStore, SelectionSet};
use crate::template::TemplateRegistry;

/// One user's working state.
#[derive(Debug)]
pub struct Session {
    config: LabelConfig,
    store: Arc<dyn KeyValueStore>,
    records: RecordStore,
    selection: SelectionSet,
    query: QueryState,
    geometry: ActiveGeometry,
    render: RenderConfig,
    templates: TemplateRegistry,
}

impl Session {
    /// Opens a session, loading custom templates and the saved selection
    /// from `store` and activating the configured default template.
    pub fn open(config: LabelConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, LabelError> {
        let templates = TemplateRegistry::open(store.clone(), config.templates_key());
        let selection: SelectionSet =
            load_json(store.as_ref(), &config.selection_key()).unwrap_or_default();
        let geometry = ActiveGeometry::from_template(
            &config.default_template,
            templates.resolve(&config.default_template)?,
        )?;

        tracing::info!(
            "Session opened with template '{}' and {} selected barcodes",
            config.default_template,
            selection.len()
        );

        Ok(Self {
            config,
            store,
            records: RecordStore::default(),
            selection,
            query: QueryState::default(),
            geometry,
            render: RenderConfig::default(),
            templates,
        })
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    // --- records ---

    /// Replaces all records and clears the selection.
    ///
    /// The previous records and selection are discarded before the new
    /// rows are examined, so a failed ingestion leaves an empty store.
    /// Failing to persist the cleared selection is logged, not returned.
    pub fn ingest<I>(&mut self, raw_records: I) -> Result<usize, LabelError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        self.records = RecordStore::default();
        self.query.set_page(1);
        if let Err(e) = self.clear_selection() {
            tracing::warn!("Selection cleared in memory only: {}", e);
        }

        self.records = RecordStore::ingest(raw_records)?;
        Ok(self.records.len())
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    // --- selection ---

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Adds or removes a batch of barcodes and persists the result once.
    ///
    /// Returns how many members changed. On a store failure the in-memory
    /// selection keeps the change.
    pub fn update_selection<I, S>(&mut self, batch: I, select: bool) -> Result<usize, LabelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let changed = self.selection.update(batch, select);
        if changed > 0 {
            tracing::info!(
                "{} {} barcodes ({} selected)",
                if select { "Selected" } else { "Deselected" },
                changed,
                self.selection.len()
            );
            self.persist_selection()?;
        }
        Ok(changed)
    }

    /// Selects or deselects every record matching the search term.
    pub fn select_filtered(&mut self, select: bool) -> Result<usize, LabelError> {
        let batch = barcodes(self.view().matches());
        self.update_selection(batch, select)
    }

    /// Selects or deselects the records on the current page.
    pub fn select_page(&mut self, select: bool) -> Result<usize, LabelError> {
        let batch = barcodes(self.view().page_rows());
        self.update_selection(batch, select)
    }

    /// Selects records with `start <= barcode <= end`.
    pub fn select_by_range(&mut self, start: &str, end: &str) -> Result<usize, LabelError> {
        let batch = owned(record::range_batch(self.records.records(), start, end));
        self.update_selection(batch, true)
    }

    /// Selects records shelved at `location`.
    pub fn select_by_location(&mut self, location: &str) -> Result<usize, LabelError> {
        let batch = owned(record::location_batch(self.records.records(), location));
        self.update_selection(batch, true)
    }

    /// Selects records whose call number starts with `prefix`.
    pub fn select_by_call_number_prefix(&mut self, prefix: &str) -> Result<usize, LabelError> {
        let batch = owned(record::call_number_prefix_batch(self.records.records(), prefix));
        self.update_selection(batch, true)
    }

    /// Empties the selection.
    pub fn clear_selection(&mut self) -> Result<usize, LabelError> {
        let batch: Vec<String> = self.selection.iter().map(str::to_string).collect();
        self.update_selection(batch, false)
    }

    fn persist_selection(&self) -> Result<(), LabelError> {
        let key = self.config.selection_key();
        let json = serde_json::to_string(&self.selection)
            .map_err(|e| LabelError::SerializationError(e.to_string()))?;
        self.store.set(&key, &json).map_err(|e| {
            tracing::warn!("Failed to persist selection: {}", e);
            LabelError::write_failure(&key, e)
        })
    }

    // --- browsing ---

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.set_search(term);
    }

    pub fn request_sort(&mut self, key: &str) {
        self.query.request_sort(key);
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.query.set_sort(sort);
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.set_page(page);
    }

    pub fn next_page(&mut self) {
        let total = self.view().total_pages();
        self.query.next_page(total);
    }

    pub fn previous_page(&mut self) {
        self.query.previous_page();
    }

    /// Filtered and sorted records, paged by the active geometry.
    pub fn view(&self) -> QueryView<'_> {
        self.query.run(self.records.records(), self.items_per_page())
    }

    pub fn items_per_page(&self) -> usize {
        self.geometry.model().slots_per_page()
    }

    // --- geometry and templates ---

    pub fn geometry(&self) -> &ActiveGeometry {
        &self.geometry
    }

    /// Activates the named template. The current page is kept.
    pub fn apply_template(&mut self, name: &str) -> Result<(), LabelError> {
        let name = name.trim();
        let model = self.templates.resolve(name)?;
        self.geometry = ActiveGeometry::from_template(name, model)?;
        tracing::info!("Applied template '{}'", name);
        Ok(())
    }

    /// Applies an ad-hoc geometry edit; invalid edits leave it unchanged.
    pub fn edit_geometry(&mut self, edit: GeometryEdit) -> Result<(), LabelError> {
        self.geometry.edit(edit)
    }

    /// Saves the active geometry as a custom template.
    pub fn save_template(&mut self, name: &str) -> Result<(), LabelError> {
        let model: GeometryModel = self.geometry.model().clone();
        self.templates.save(name, &model)
    }

    pub fn delete_template(&mut self, name: &str) -> Result<(), LabelError> {
        self.templates.delete(name)
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    // --- rendering ---

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    pub fn render_config_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    /// Selected records in print order (barcode ascending).
    pub fn print_list(&self) -> Vec<&Record> {
        layout::print_order(&self.records, &self.selection)
    }

    /// Slots for the print list, one page or many per the configured flow.
    pub fn print_pages(&self) -> Vec<Vec<Slot<'_>>> {
        let records = self.print_list();
        let geometry = self.geometry.model();
        match self.config.print_flow {
            PrintFlow::SinglePage => vec![layout::assemble_page(&records, geometry)],
            PrintFlow::MultiPage => layout::assemble_pages(&records, geometry),
        }
    }

    /// Print pages with label content, ready for the renderer.
    pub fn render_print(&self) -> Vec<Vec<RenderedSlot>> {
        self.print_pages()
            .iter()
            .map(|slots| layout::render_page(slots, &self.render))
            .collect()
    }

    /// Label rendered from sample data with the current options.
    pub fn preview(&self) -> LabelContent {
        label::preview(&self.render)
    }
}

fn barcodes(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.barcode().to_string()).collect()
}

fn owned(batch: Vec<&str>) -> Vec<String> {
    batch.into_iter().map(str::to_string).collect()
}
