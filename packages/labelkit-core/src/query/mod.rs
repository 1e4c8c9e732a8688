//! Filter, sort and paginate pipeline over the record store.
//!
//! Every stage is a pure function of its inputs. [`QueryState`] holds the
//! browsing state (search term, sort, current page) and enforces the page
//! reset rules; [`QueryState::run`] evaluates the full pipeline.

pub mod collate;

use serde::{Deserialize, Serialize};

use crate::record::{fields, Record};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: fields::BARCODE.to_string(),
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Spec resulting from a sort request on `key`: an ascending sort on
    /// the same key flips to descending, anything else sorts ascending.
    pub fn requested(&self, key: &str) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self::new(key, direction)
    }
}

/// Records with any field value containing `term`, case-insensitively.
pub fn filter<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .values()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort by `spec.key`; absent fields sort as empty strings.
pub fn sort(records: &mut [&Record], spec: &SortSpec) {
    records.sort_by(|a, b| {
        let ord = collate::compare_natural(a.field_or_empty(&spec.key), b.field_or_empty(&spec.key));
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// The 1-based `page` of `items`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, items_per_page: usize) -> &[T] {
    let per_page = items_per_page.max(1);
    let Some(start) = page.checked_sub(1).and_then(|p| p.checked_mul(per_page)) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `count` items, at least one.
pub fn total_pages(count: usize, items_per_page: usize) -> usize {
    count.div_ceil(items_per_page.max(1)).max(1)
}

/// Browsing state: search term, sort and current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search: String,
    sort: SortSpec,
    page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortSpec::default(),
            page: 1,
        }
    }
}

impl QueryState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Sets the search term and returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Requests a sort on `key` and returns to page 1.
    pub fn request_sort(&mut self, key: &str) {
        self.sort = self.sort.requested(key);
        self.page = 1;
    }

    /// Replaces the sort outright and returns to page 1.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.page = 1;
    }

    /// Jumps to `page`. Page numbers are not range-checked here.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Moves forward one page, stopping at `total_pages`.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Moves back one page, stopping at page 1.
    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Runs filter and sort over `records`, keeping the page for slicing.
    pub fn run<'a>(&self, records: &'a [Record], items_per_page: usize) -> QueryView<'a> {
        let mut matches = filter(records, &self.search);
        sort(&mut matches, &self.sort);
        tracing::debug!(
            "Query '{}' matched {} of {} records",
            self.search,
            matches.len(),
            records.len()
        );
        QueryView {
            matches,
            page: self.page,
            items_per_page: items_per_page.max(1),
        }
    }
}

/// Filtered, sorted records plus the requested page.
#[derive(Debug, Clone)]
pub struct QueryView<'a> {
    matches: Vec<&'a Record>,
    page: usize,
    items_per_page: usize,
}

impl<'a> QueryView<'a> {
    /// All filtered records in sort order.
    pub fn matches(&self) -> &[&'a Record] {
        &self.matches
    }

    /// Records on the requested page; empty when it is out of range.
    pub fn page_rows(&self) -> &[&'a Record] {
        paginate(&self.matches, self.page, self.items_per_page)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.matches.len(), self.items_per_page)
    }

    /// Requested page clamped into `1..=total_pages` for display.
    pub fn clamped_page(&self) -> usize {
        self.page.clamp(1, self.total_pages())
    }
}
