use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::error::{PickerError, Result};
use crate::model::{CollectionNode, ItemId, PickerItem};

/// Flat, read-only snapshot of an expanded collection tree.
///
/// Nodes only link downwards, so the parent of every node is recorded while
/// the index is built and ancestor queries never walk the tree itself.
#[derive(Debug, Clone, Default)]
pub struct CollectionIndex {
    nodes: HashMap<ItemId, CollectionNode>,
    parents: HashMap<ItemId, ItemId>,
}

impl CollectionIndex {
    /// Build an index from the root of an expanded tree
    pub fn from_root(root: CollectionNode) -> Self {
        let start_time = Instant::now();
        let mut index = Self::default();
        index.insert_subtree(&root, None);
        log::debug!(
            "CollectionIndex::from_root: indexed {} collections in {:?}",
            index.nodes.len(),
            start_time.elapsed()
        );
        index
    }

    fn insert_subtree(&mut self, node: &CollectionNode, parent: Option<ItemId>) {
        let parent = node.collection_id.or(parent);
        if let Some(parent) = parent {
            self.parents.insert(node.id, parent);
        }
        for child in node.children() {
            self.insert_subtree(child, Some(node.id));
        }
        if self.nodes.insert(node.id, node.clone()).is_some() {
            log::warn!("CollectionIndex: collection {} appears more than once", node.id);
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&CollectionNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn root(&self) -> Option<&CollectionNode> {
        self.get(ItemId::Root)
    }

    pub fn children_of(&self, id: ItemId) -> Option<&[CollectionNode]> {
        self.get(id).and_then(|node| node.children.as_deref())
    }

    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.parents.get(&id).copied()
    }

    /// Ids from the root down to `id`, inclusive. Empty for unknown ids.
    pub fn path_to(&self, id: ItemId) -> Vec<ItemId> {
        if !self.contains(id) {
            return Vec::new();
        }

        let mut path = vec![id];
        let mut seen = HashSet::from([id]);
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            if !seen.insert(parent) {
                log::warn!("CollectionIndex::path_to: parent chain of {} loops at {}", id, parent);
                break;
            }
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Id of the collection an item lives in.
    pub fn owner_id(&self, item: &PickerItem) -> ItemId {
        item.collection_id()
            .or_else(|| match item {
                PickerItem::Collection(node) => self.parent_of(node.id),
                PickerItem::Content(_) => None,
            })
            .unwrap_or(ItemId::Root)
    }

    pub fn owner_of(&self, item: &PickerItem) -> Result<&CollectionNode> {
        let owner = self.owner_id(item);
        self.get(owner).ok_or(PickerError::MissingCollection(owner))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
