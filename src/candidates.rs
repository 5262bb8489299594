//! Candidate resolution: which rows the picker should show right now.
//!
//! With an empty search string the open collection's children are listed
//! straight from the index. A search query is built whenever a search string
//! is present or content models are requested; its results come back
//! asynchronously and are filtered with [`filter_search_results`].

use crate::collection_index::CollectionIndex;
use crate::model::{ModelSet, PickerItem};
use crate::navigator::{NavigationState, NavigatorMode};
use crate::sources::SearchQuery;
use crate::visibility::{is_visible_in_search, is_visible_in_tree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    /// Tree listing, present only while the search string is empty.
    pub tree: Option<Vec<PickerItem>>,
    /// Query whose results should be listed below the tree.
    pub search: Option<SearchQuery>,
}

impl Candidates {
    pub fn mode(&self) -> NavigatorMode {
        if self.search.is_some() {
            NavigatorMode::Search
        } else {
            NavigatorMode::Tree
        }
    }
}

pub fn resolve_candidates(
    nav: &NavigationState,
    models: &ModelSet,
    index: Option<&CollectionIndex>,
) -> Candidates {
    let tree = if nav.search_string().is_empty() {
        Some(index.map(|index| tree_candidates(nav, models, index)).unwrap_or_default())
    } else {
        None
    };

    Candidates {
        tree,
        search: build_search_query(nav, models),
    }
}

/// Children of the open collection, with the root listed alongside its own
/// children when collections are pickable.
pub fn tree_candidates(
    nav: &NavigationState,
    models: &ModelSet,
    index: &CollectionIndex,
) -> Vec<PickerItem> {
    let open_id = nav.open_collection_id();
    let Some(open) = index.get(open_id) else {
        log::debug!("tree_candidates: collection {} not in index", open_id);
        return Vec::new();
    };

    let mut listing: Vec<&_> = Vec::new();
    if open.is_root() && models.picks_collections() {
        listing.push(open);
    }
    listing.extend(open.children());

    listing
        .into_iter()
        .filter(|node| is_visible_in_tree(node))
        .map(|node| PickerItem::Collection(node.clone()))
        .collect()
}

pub fn build_search_query(nav: &NavigationState, models: &ModelSet) -> Option<SearchQuery> {
    let search_string = nav.search_string();
    if search_string.is_empty() && !models.picks_content() {
        return None;
    }

    let (q, collection) = if search_string.is_empty() {
        (None, Some(nav.open_collection_id()))
    } else {
        (Some(search_string.to_string()), None)
    };

    Some(SearchQuery {
        q,
        collection,
        // A single model is filtered by the search index, several locally
        models: models.is_single().then(|| models.as_slice().to_vec()),
    })
}

/// Apply search-listing visibility to whatever the search index returned.
pub fn filter_search_results(
    items: &[PickerItem],
    nav: &NavigationState,
    models: &ModelSet,
    index: &CollectionIndex,
) -> Vec<PickerItem> {
    items
        .iter()
        .filter(|item| is_visible_in_search(item, models, index, nav.search_string()))
        .cloned()
        .collect()
}
