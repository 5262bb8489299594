//! Turning row activations into a value or a navigation.

use crate::collection_index::CollectionIndex;
use crate::identity::identity_of;
use crate::model::{ItemId, ModelSet, PickerItem, PickerValue};
use crate::permissions::can_select;
use crate::visibility::has_expandable_children;

/// Outcome of activating a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Emit a new value to the host.
    Select(PickerValue),
    /// Open the collection instead of selecting it.
    Navigate(ItemId),
}

/// Which listing a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Tree,
    Search,
}

/// A rendered candidate with everything the frontend needs to draw and
/// activate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRow {
    pub item: PickerItem,
    pub section: Section,
    pub selected: bool,
    pub selectable: bool,
    pub expandable: bool,
}

impl PickerRow {
    /// Row for a collection listed from the tree. Only a row that can be
    /// picked is ever marked as selected.
    pub fn tree(
        item: PickerItem,
        value: Option<&PickerValue>,
        models: &ModelSet,
        index: &CollectionIndex,
    ) -> Self {
        let selectable = models.picks_collections() && can_select(&item, models, index);
        let expandable = item
            .as_collection()
            .is_some_and(|node| has_expandable_children(node, models));
        Self {
            selected: selectable && is_selected(&item, value, models),
            item,
            section: Section::Tree,
            selectable,
            expandable,
        }
    }

    /// Row for a search hit. Search results are already filtered down to
    /// pickable items and are never navigated into.
    pub fn search(item: PickerItem, value: Option<&PickerValue>, models: &ModelSet) -> Self {
        Self {
            selected: is_selected(&item, value, models),
            item,
            section: Section::Search,
            selectable: true,
            expandable: false,
        }
    }

    /// Shown only so the user can move into it.
    pub fn is_navigable_only(&self) -> bool {
        !self.selectable && self.expandable
    }
}

/// Decide what activating a row does. Inert rows (neither selectable nor
/// expandable) yield `None`.
pub fn on_item_activated(row: &PickerRow) -> Option<Activation> {
    if row.selectable {
        let value = if row.item.is_root() {
            PickerValue::root()
        } else {
            PickerValue::from(&row.item)
        };
        log::info!("on_item_activated: selecting {} {}", row.item.model(), row.item.id());
        return Some(Activation::Select(value));
    }

    match &row.item {
        PickerItem::Collection(node) if row.expandable => {
            log::debug!("on_item_activated: navigating into {}", node.id);
            Some(Activation::Navigate(node.id))
        }
        _ => None,
    }
}

/// Whether `item` is the currently selected value. Model tags are ignored when
/// only one model is pickable.
pub fn is_selected(item: &PickerItem, value: Option<&PickerValue>, models: &ModelSet) -> bool {
    let Some(value) = value else {
        return false;
    };
    let Some(item_key) = identity_of(Some(item)) else {
        return false;
    };
    if identity_of(Some(value)) != Some(item_key) {
        return false;
    }
    value.model == Some(item.model()) || models.is_single()
}
