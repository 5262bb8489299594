//! Picker state owned by the host: navigation, data snapshots and cursor.

use tokio_util::sync::CancellationToken;

use crate::candidates::{filter_search_results, resolve_candidates, Candidates};
use crate::collection_index::CollectionIndex;
use crate::config::PickerConfig;
use crate::model::{Entity, ItemId, PickerItem, PickerValue};
use crate::navigator::{Crumb, NavigationState, NavigatorEvent};
use crate::selection::{on_item_activated, Activation, PickerRow};
use crate::sources::SearchQuery;

/// The search currently in flight or answered. `results == None` while the
/// query is outstanding or after it failed.
#[derive(Debug, Default)]
struct SearchSlot {
    query: Option<SearchQuery>,
    results: Option<Vec<PickerItem>>,
    cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct Picker {
    config: PickerConfig,
    nav: NavigationState,
    index: Option<CollectionIndex>,
    search: SearchSlot,
    search_draft: String,
    cursor: usize,
    pub status_message: String,
    pub should_quit: bool,
}

impl Picker {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            config,
            nav: NavigationState::new(),
            index: None,
            search: SearchSlot::default(),
            search_draft: String::new(),
            cursor: 0,
            status_message: "Loading collections...".to_string(),
            should_quit: false,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn index(&self) -> Option<&CollectionIndex> {
        self.index.as_ref()
    }

    pub fn value(&self) -> Option<&PickerValue> {
        self.config.value.as_ref()
    }

    pub fn search_draft(&self) -> &str {
        &self.search_draft
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the collection snapshot. Snapshots for another namespace are
    /// ignored.
    pub fn set_index(&mut self, entity: Entity, index: CollectionIndex) -> bool {
        if entity != self.config.entity {
            log::debug!("Picker: ignoring {} index while browsing {}", entity, self.config.entity);
            return false;
        }
        self.status_message = format!("Loaded {} collections", index.len());
        self.index = Some(index);
        self.clamp_cursor();
        true
    }

    pub fn index_failed(&mut self, message: &str) {
        self.status_message = format!("Failed to load collections: {}", message);
    }

    pub fn is_loading_tree(&self) -> bool {
        self.index.is_none()
    }

    pub fn is_loading_search(&self) -> bool {
        self.search.query.is_some() && self.search.results.is_none()
    }

    pub fn candidates(&self) -> Candidates {
        resolve_candidates(&self.nav, &self.config.models, self.index.as_ref())
    }

    pub fn crumbs(&self) -> Vec<Crumb> {
        match &self.index {
            Some(index) => self.nav.crumbs(index),
            None => self.nav.crumbs(&CollectionIndex::default()),
        }
    }

    /// Tree rows followed by search rows.
    pub fn rows(&self) -> Vec<PickerRow> {
        let Some(index) = self.index.as_ref() else {
            return Vec::new();
        };
        let candidates = self.candidates();
        let models = &self.config.models;
        let value = self.config.value.as_ref();
        let searching = self.nav.is_searching();

        let mut rows: Vec<PickerRow> = candidates
            .tree
            .unwrap_or_default()
            .into_iter()
            .map(|item| {
                let mut row = PickerRow::tree(item, value, models, index);
                // Collections cannot be opened while the search box is open
                row.expandable &= !searching;
                row
            })
            .collect();

        if candidates.search.is_some() && candidates.search == self.search.query {
            if let Some(results) = &self.search.results {
                rows.extend(
                    filter_search_results(results, &self.nav, models, index)
                        .into_iter()
                        .map(|item| PickerRow::search(item, value, models)),
                );
            }
        }

        rows
    }

    pub fn selected_row(&self) -> Option<PickerRow> {
        self.rows().into_iter().nth(self.cursor)
    }

    /// Work out whether the current state needs a different search than the
    /// one in flight. Returns the new query and its cancellation token; the
    /// previous query's token is cancelled.
    pub fn refresh_search(&mut self) -> Option<(SearchQuery, CancellationToken)> {
        let wanted = self.candidates().search;
        if wanted == self.search.query {
            return None;
        }

        if let Some(cancel) = self.search.cancel.take() {
            cancel.cancel();
        }

        let Some(query) = wanted else {
            self.search = SearchSlot::default();
            return None;
        };

        log::debug!("Picker: issuing search {:?}", query);
        let cancel = CancellationToken::new();
        self.search = SearchSlot {
            query: Some(query.clone()),
            results: None,
            cancel: Some(cancel.clone()),
        };
        Some((query, cancel))
    }

    /// Store results if they answer the current query. Stale answers are
    /// dropped so a slow response cannot overwrite a newer one.
    pub fn apply_search_results(&mut self, query: &SearchQuery, items: Vec<PickerItem>) -> bool {
        if self.search.query.as_ref() != Some(query) {
            log::debug!("Picker: dropping stale search results for {:?}", query);
            return false;
        }
        self.status_message = format!("{} results", items.len());
        self.search.results = Some(items);
        self.search.cancel = None;
        self.clamp_cursor();
        true
    }

    pub fn search_failed(&mut self, query: &SearchQuery, message: &str) -> bool {
        if self.search.query.as_ref() != Some(query) {
            return false;
        }
        self.status_message = format!("Search failed: {}", message);
        self.search.results = Some(Vec::new());
        self.search.cancel = None;
        self.clamp_cursor();
        true
    }

    pub fn cursor_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn cursor_down(&mut self) -> bool {
        if self.cursor + 1 >= self.rows().len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    fn clamp_cursor(&mut self) {
        let len = self.rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn apply_navigation(&mut self, event: NavigatorEvent) -> bool {
        let changed = self.nav.handle_event(event);
        if changed {
            self.cursor = 0;
        }
        changed
    }

    /// Activate the row under the cursor.
    pub fn activate_selected(&mut self) -> Option<Activation> {
        let row = self.selected_row()?;
        self.activate(&row)
    }

    /// Select or navigate, depending on the row. A selection becomes the
    /// highlighted value; the caller is responsible for reporting it.
    /// `Navigate` is only returned when the open collection actually changed.
    pub fn activate(&mut self, row: &PickerRow) -> Option<Activation> {
        let activation = on_item_activated(row)?;
        match &activation {
            Activation::Select(value) => {
                self.config.value = Some(value.clone());
                self.status_message = format!("Selected {}", row.item.name());
            }
            Activation::Navigate(id) => {
                if !self.apply_navigation(NavigatorEvent::OpenCollection(*id)) {
                    log::debug!("Picker: navigation to {} changed nothing", id);
                    return None;
                }
            }
        }
        Some(activation)
    }

    /// Navigate into the row under the cursor if it has children, even when it
    /// is also selectable.
    pub fn open_selected(&mut self) -> bool {
        match self.selected_row() {
            Some(row) if row.expandable => self.apply_navigation(NavigatorEvent::OpenCollection(row.item.id())),
            _ => false,
        }
    }

    pub fn open_collection(&mut self, id: ItemId) -> bool {
        self.apply_navigation(NavigatorEvent::OpenCollection(id))
    }

    pub fn go_to_crumb(&mut self, position: usize) -> bool {
        match self.crumbs().get(position) {
            Some(crumb) => self.open_collection(crumb.id),
            None => false,
        }
    }

    /// Open the parent of the open collection.
    pub fn go_up(&mut self) -> bool {
        let crumbs = self.crumbs();
        if crumbs.len() < 2 {
            return false;
        }
        self.go_to_crumb(crumbs.len() - 2)
    }

    pub fn open_search(&mut self) -> bool {
        if !self.config.show_search {
            return false;
        }
        self.search_draft.clear();
        self.apply_navigation(NavigatorEvent::OpenSearch)
    }

    pub fn close_search(&mut self) -> bool {
        self.search_draft.clear();
        self.apply_navigation(NavigatorEvent::CloseSearch)
    }

    pub fn push_search_char(&mut self, c: char) {
        if self.nav.is_searching() {
            self.search_draft.push(c);
        }
    }

    pub fn pop_search_char(&mut self) {
        if self.nav.is_searching() {
            self.search_draft.pop();
        }
    }

    /// Commit the draft as the active search string.
    pub fn submit_search(&mut self) -> bool {
        let query = self.search_draft.trim().to_string();
        self.apply_navigation(NavigatorEvent::SubmitSearch(query))
    }
}
