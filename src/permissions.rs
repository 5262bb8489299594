use crate::collection_index::CollectionIndex;
use crate::model::{CollectionNode, ModelSet, PickerItem};

/// Whether the current user may pick `item`.
///
/// When collections are pickable a collection row is judged by its own
/// `can_write` flag only. Everything else inherits write access from the
/// collection that owns it; an owner missing from the index means the item
/// cannot be picked.
pub fn can_select(item: &PickerItem, models: &ModelSet, index: &CollectionIndex) -> bool {
    if let PickerItem::Collection(node) = item {
        if models.picks_collections() {
            return node.can_write;
        }
    }

    match index.owner_of(item) {
        Ok(owner) => owner.can_write,
        Err(e) => {
            log::debug!("can_select: {} {} is not selectable: {}", item.model(), item.id(), e);
            false
        }
    }
}

/// True if the collection or any loaded descendant is writable.
/// Assumes an acyclic hierarchy.
pub fn writable_subtree(collection: &CollectionNode) -> bool {
    collection.can_write || collection.children().iter().any(writable_subtree)
}
