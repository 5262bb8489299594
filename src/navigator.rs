//! Navigation state for the picker
//!
//! Tracks which collection is open and whether a search is active. Only
//! explicit user events change this state; data loads never touch it.

use serde::{Deserialize, Serialize};

use crate::collection_index::CollectionIndex;
use crate::model::ItemId;

/// Events that can be sent to the navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorEvent {
    OpenSearch,
    CloseSearch,
    SubmitSearch(String),
    OpenCollection(ItemId),
}

/// Which listing the navigator is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorMode {
    Tree,
    Search,
}

/// One clickable step of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub id: ItemId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    open_collection_id: ItemId,
    search_string: String,
    search_active: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// Start at the root with no search
    pub fn new() -> Self {
        Self {
            open_collection_id: ItemId::Root,
            search_string: String::new(),
            search_active: false,
        }
    }

    /// Handle an event and return whether the state changed
    pub fn handle_event(&mut self, event: NavigatorEvent) -> bool {
        let state_before = self.clone();

        match event {
            NavigatorEvent::OpenSearch => {
                if !self.search_active {
                    self.search_active = true;
                    self.search_string.clear();
                }
            }

            NavigatorEvent::CloseSearch => {
                if self.search_active {
                    self.search_active = false;
                    self.search_string.clear();
                }
            }

            NavigatorEvent::SubmitSearch(query) => {
                if self.search_active {
                    self.search_string = query;
                } else {
                    log::debug!("NavigationState: ignoring search submit outside search");
                }
            }

            NavigatorEvent::OpenCollection(id) => {
                if self.search_active {
                    log::debug!("NavigationState: ignoring open of {} while searching", id);
                } else {
                    self.open_collection_id = id;
                }
            }
        }

        let state_changed = *self != state_before;
        if state_changed {
            log::debug!("NavigationState: now {:?}", self);
        }
        state_changed
    }

    pub fn mode(&self) -> NavigatorMode {
        if self.search_active {
            NavigatorMode::Search
        } else {
            NavigatorMode::Tree
        }
    }

    pub fn open_collection_id(&self) -> ItemId {
        self.open_collection_id
    }

    pub fn search_string(&self) -> &str {
        &self.search_string
    }

    pub fn is_searching(&self) -> bool {
        self.search_active
    }

    /// Breadcrumbs from the root to the open collection.
    ///
    /// Falls back to a lone root crumb while the open collection is not in the
    /// index (for example before the first load completes).
    pub fn crumbs(&self, index: &CollectionIndex) -> Vec<Crumb> {
        let path = index.path_to(self.open_collection_id);
        if path.is_empty() {
            let name = index
                .root()
                .map(|root| root.name.clone())
                .unwrap_or_default();
            return vec![Crumb { id: ItemId::Root, name }];
        }

        path.into_iter()
            .filter_map(|id| {
                index.get(id).map(|node| Crumb {
                    id,
                    name: node.name.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CollectionNode;

    fn create_test_index() -> CollectionIndex {
        // root
        //   1 Marketing
        //     4 Campaigns
        let root = CollectionNode::root("Our analytics", true).with_child(
            CollectionNode::new(ItemId::Id(1), "Marketing", true)
                .with_child(CollectionNode::new(ItemId::Id(4), "Campaigns", true)),
        );
        CollectionIndex::from_root(root)
    }

    #[test]
    fn test_navigation_state_creation() {
        let nav = NavigationState::new();
        assert_eq!(nav.open_collection_id(), ItemId::Root);
        assert_eq!(nav.search_string(), "");
        assert!(!nav.is_searching());
        assert_eq!(nav.mode(), NavigatorMode::Tree);
    }

    #[test]
    fn test_open_collection_is_idempotent() {
        let mut nav = NavigationState::new();
        assert!(nav.handle_event(NavigatorEvent::OpenCollection(ItemId::Id(4))));
        let snapshot = nav.clone();
        assert!(!nav.handle_event(NavigatorEvent::OpenCollection(ItemId::Id(4))));
        assert_eq!(nav, snapshot);
    }

    #[test]
    fn test_search_lifecycle() {
        let mut nav = NavigationState::new();
        nav.handle_event(NavigatorEvent::OpenCollection(ItemId::Id(1)));

        assert!(nav.handle_event(NavigatorEvent::OpenSearch));
        assert_eq!(nav.mode(), NavigatorMode::Search);
        assert_eq!(nav.search_string(), "");

        assert!(nav.handle_event(NavigatorEvent::SubmitSearch("sales".to_string())));
        assert_eq!(nav.search_string(), "sales");

        assert!(nav.handle_event(NavigatorEvent::CloseSearch));
        assert_eq!(nav.mode(), NavigatorMode::Tree);
        assert_eq!(nav.search_string(), "");
        // Closing search returns to the collection that was open before
        assert_eq!(nav.open_collection_id(), ItemId::Id(1));
    }

    #[test]
    fn test_submit_outside_search_is_ignored() {
        let mut nav = NavigationState::new();
        assert!(!nav.handle_event(NavigatorEvent::SubmitSearch("x".to_string())));
        assert_eq!(nav.search_string(), "");
    }

    #[test]
    fn test_open_collection_ignored_while_searching() {
        let mut nav = NavigationState::new();
        nav.handle_event(NavigatorEvent::OpenSearch);
        assert!(!nav.handle_event(NavigatorEvent::OpenCollection(ItemId::Id(1))));
        assert_eq!(nav.open_collection_id(), ItemId::Root);
    }

    #[test]
    fn test_reopening_search_clears_string() {
        let mut nav = NavigationState::new();
        nav.handle_event(NavigatorEvent::OpenSearch);
        nav.handle_event(NavigatorEvent::SubmitSearch("old".to_string()));
        nav.handle_event(NavigatorEvent::CloseSearch);
        nav.handle_event(NavigatorEvent::OpenSearch);
        assert_eq!(nav.search_string(), "");
    }

    #[test]
    fn test_crumbs_follow_index_parents() {
        let index = create_test_index();
        let mut nav = NavigationState::new();
        nav.handle_event(NavigatorEvent::OpenCollection(ItemId::Id(4)));

        let names: Vec<_> = nav.crumbs(&index).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Our analytics", "Marketing", "Campaigns"]);
    }

    #[test]
    fn test_crumbs_for_unknown_collection() {
        let mut nav = NavigationState::new();
        nav.handle_event(NavigatorEvent::OpenCollection(ItemId::Id(77)));
        let crumbs = nav.crumbs(&CollectionIndex::default());
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].id, ItemId::Root);
    }
}
