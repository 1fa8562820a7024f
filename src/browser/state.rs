//! The explicit state container driving the derivation pipeline.

use std::collections::HashSet;
use std::time::Instant;

use chrono::{DateTime, Utc};

use super::debounce::SearchDebounce;
use super::page::PageWindow;
use super::query::{QueryState, row_matches};
use super::sort::{self, SortDirection, SortKey};
use crate::catalog::{ModelRow, Snapshot};

/// Optional columns active in this view.
#[derive(Debug, Clone, Copy)]
pub struct Columns {
    pub image_cost: bool,
    pub cache_costs: bool,
    /// Show descriptions and include them in text search.
    pub descriptions: bool,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            image_cost: true,
            cache_costs: true,
            descriptions: false,
        }
    }
}

/// Catalog browser state: one snapshot plus the query, sort, and paging
/// inputs, with the row derivation recomputed on demand.
///
/// Mutation happens on a single event loop; the only asynchronous piece is
/// the fetch, which hands its outcome back through [`Browser::apply_snapshot`]
/// or [`Browser::apply_error`].
pub struct Browser {
    catalog: Vec<ModelRow>,
    providers: Vec<String>,
    last_updated: Option<DateTime<Utc>>,
    error: Option<String>,
    loading: bool,

    query: String,
    search: SearchDebounce,
    selected_providers: HashSet<String>,
    hide_free: bool,
    columns: Columns,
    sort_key: SortKey,
    sort_direction: SortDirection,
    page: PageWindow,
}

impl Browser {
    #[must_use]
    pub fn new(columns: Columns) -> Self {
        Self {
            catalog: Vec::new(),
            providers: Vec::new(),
            last_updated: None,
            error: None,
            loading: false,
            query: String::new(),
            search: SearchDebounce::default(),
            selected_providers: HashSet::new(),
            hide_free: false,
            columns,
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            page: PageWindow::default(),
        }
    }

    /// Mark a fetch as started. Returns false if one is already in
    /// flight, making a repeated manual refresh a no-op.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loading {
            tracing::debug!("refresh ignored: fetch already in flight");
            return false;
        }
        self.loading = true;
        true
    }

    /// Replace the catalog wholesale with a new snapshot.
    ///
    /// Pins are carried forward by id; rows whose id disappeared lose
    /// theirs. Clears any error state.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let pinned: HashSet<String> = self
            .catalog
            .iter()
            .filter(|r| r.keep)
            .map(|r| r.id.clone())
            .collect();

        let mut rows = snapshot.rows;
        if !pinned.is_empty() {
            for row in &mut rows {
                row.keep = pinned.contains(&row.id);
            }
        }

        self.catalog = rows;
        self.providers = snapshot.providers;
        self.last_updated = Some(snapshot.fetched_at);
        self.error = None;
        self.loading = false;
        tracing::debug!("snapshot applied: {} models", self.catalog.len());
    }

    /// Surface a fetch failure, keeping the last-good snapshot visible.
    pub fn apply_error(&mut self, message: String) {
        tracing::warn!("catalog fetch failed: {message}");
        self.error = Some(message);
        self.loading = false;
    }

    /// Feed raw search input into the debounce; nothing recomputes until
    /// [`Browser::tick`] commits it after the quiet period.
    pub fn set_search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.set(text, now);
    }

    /// Commit pending search input if its quiet period has elapsed.
    /// Returns true when the committed query actually changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(text) if text != self.query => {
                self.query = text;
                self.page.reset();
                true
            }
            _ => false,
        }
    }

    pub fn toggle_provider(&mut self, provider: &str) {
        if !self.selected_providers.remove(provider) {
            self.selected_providers.insert(provider.to_string());
        }
        self.page.reset();
    }

    pub fn set_providers(&mut self, providers: HashSet<String>) {
        self.selected_providers = providers;
        self.page.reset();
    }

    pub fn toggle_hide_free(&mut self) {
        self.hide_free = !self.hide_free;
        self.page.reset();
    }

    /// Toggle description display and search. Deliberately does not reset
    /// the page window; only query/provider/free changes do.
    pub fn toggle_descriptions(&mut self) {
        self.columns.descriptions = !self.columns.descriptions;
    }

    /// Select a sort column; re-selecting the active one flips direction,
    /// switching columns starts ascending.
    pub fn set_sort(&mut self, key: SortKey) {
        if key == self.sort_key {
            self.sort_direction = self.sort_direction.flip();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Set the sort column directly, resetting to ascending. Used by the
    /// one-shot CLI where toggle semantics make no sense.
    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.sort_direction = SortDirection::Ascending;
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
    }

    /// Toggle the keep pin on a row. Returns false if the id is unknown.
    pub fn toggle_keep(&mut self, id: &str) -> bool {
        match self.catalog.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.keep = !row.keep;
                true
            }
            None => false,
        }
    }

    pub fn load_more(&mut self) {
        self.page.load_more();
    }

    /// The string a front-end should place on the clipboard for a row.
    #[must_use]
    pub fn copy_payload(&self, id: &str) -> Option<String> {
        self.catalog.iter().find(|r| r.id == id).map(|r| r.id.clone())
    }

    fn filtered(&self) -> Vec<&ModelRow> {
        let q = QueryState {
            query: &self.query,
            providers: &self.selected_providers,
            hide_free: self.hide_free,
            search_descriptions: self.columns.descriptions,
        };
        self.catalog.iter().filter(|r| row_matches(r, &q)).collect()
    }

    /// The rendered rows: filtered, sorted, cut to the page window.
    /// Stable sort over insertion order, so ties never reshuffle.
    #[must_use]
    pub fn rows(&self) -> Vec<&ModelRow> {
        let mut view = self.filtered();
        view.sort_by(|a, b| sort::compare(a, b, self.sort_key, self.sort_direction));
        view.truncate(self.page.limit());
        view
    }

    /// Count of rows passing the filters, before pagination.
    #[must_use]
    pub fn total_matching(&self) -> usize {
        self.filtered().len()
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page.has_more(self.total_matching())
    }

    #[must_use]
    pub fn providers(&self) -> &[String] {
        &self.providers
    }

    #[must_use]
    pub fn selected_providers(&self) -> &HashSet<String> {
        &self.selected_providers
    }

    #[must_use]
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn hide_free(&self) -> bool {
        self.hide_free
    }

    #[must_use]
    pub fn columns(&self) -> Columns {
        self.columns
    }

    #[must_use]
    pub fn sort(&self) -> (SortKey, SortDirection) {
        (self.sort_key, self.sort_direction)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}
