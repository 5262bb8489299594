//! Which items appear at all, independent of whether they can be picked.

use crate::collection_index::CollectionIndex;
use crate::model::{CollectionNode, ModelSet, PickerItem};
use crate::permissions::{can_select, writable_subtree};

/// Tree listing: read-only collections without writable descendants are pruned.
pub fn is_visible_in_tree(node: &CollectionNode) -> bool {
    writable_subtree(node)
}

/// Search listing: the item must be pickable and of a requested model.
/// Collections are only listed here while a search string is active; otherwise
/// they are navigated through the tree instead.
pub fn is_visible_in_search(
    item: &PickerItem,
    models: &ModelSet,
    index: &CollectionIndex,
    search_string: &str,
) -> bool {
    if !models.contains(item.model()) {
        return false;
    }
    if item.model().is_collection() && search_string.is_empty() {
        return false;
    }
    can_select(item, models, index)
}

/// Whether a collection row offers navigation into it.
///
/// Content is not loaded eagerly, so whenever non-collection models are
/// requested any collection may hold something pickable. The root's children
/// are already listed flat next to it, so it never expands when only
/// collections are picked.
pub fn has_expandable_children(collection: &CollectionNode, models: &ModelSet) -> bool {
    if models.picks_content() {
        return true;
    }
    if collection.is_root() {
        return false;
    }
    collection.has_known_children()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentItem, ItemId, ModelKind};

    fn create_test_index() -> CollectionIndex {
        let root = CollectionNode::root("Our analytics", true)
            .with_child(CollectionNode::new(ItemId::Id(1), "Team", true).with_no_children())
            .with_child(CollectionNode::new(ItemId::Id(2), "Locked", false).with_no_children());
        CollectionIndex::from_root(root)
    }

    #[test]
    fn test_tree_prunes_dead_read_only_branches() {
        let index = create_test_index();
        assert!(is_visible_in_tree(index.get(ItemId::Id(1)).unwrap()));
        assert!(!is_visible_in_tree(index.get(ItemId::Id(2)).unwrap()));
    }

    #[test]
    fn test_search_requires_requested_model() {
        let index = create_test_index();
        let models = ModelSet::new([ModelKind::Card]).unwrap();
        let card = PickerItem::from(ContentItem::new(1, ModelKind::Card, "a", Some(ItemId::Id(1))));
        let dashboard = PickerItem::from(ContentItem::new(2, ModelKind::Dashboard, "b", Some(ItemId::Id(1))));
        assert!(is_visible_in_search(&card, &models, &index, ""));
        assert!(!is_visible_in_search(&dashboard, &models, &index, ""));
    }

    #[test]
    fn test_search_requires_permission() {
        let index = create_test_index();
        let models = ModelSet::new([ModelKind::Card]).unwrap();
        let locked = PickerItem::from(ContentItem::new(1, ModelKind::Card, "a", Some(ItemId::Id(2))));
        assert!(!is_visible_in_search(&locked, &models, &index, "a"));
    }

    #[test]
    fn test_search_lists_collections_only_with_search_string() {
        let index = create_test_index();
        let models = ModelSet::new([ModelKind::Collection, ModelKind::Card]).unwrap();
        let team = PickerItem::from(index.get(ItemId::Id(1)).cloned().unwrap());
        assert!(!is_visible_in_search(&team, &models, &index, ""));
        assert!(is_visible_in_search(&team, &models, &index, "te"));
    }

    #[test]
    fn test_expandable_children() {
        let index = create_test_index();
        let collections = ModelSet::collections_only();
        let content = ModelSet::new([ModelKind::Card]).unwrap();
        let root = index.root().unwrap();
        let team = index.get(ItemId::Id(1)).unwrap();
        let unloaded = CollectionNode::new(ItemId::Id(8), "Unloaded", true);

        assert!(!has_expandable_children(root, &collections));
        assert!(!has_expandable_children(team, &collections));
        assert!(!has_expandable_children(&unloaded, &collections));
        assert!(has_expandable_children(
            &CollectionNode::new(ItemId::Id(3), "Parent", true).with_child(unloaded.clone()),
            &collections
        ));

        assert!(has_expandable_children(root, &content));
        assert!(has_expandable_children(team, &content));
    }
}
