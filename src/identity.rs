//! Normalized identity for comparing rows against the current value.
//!
//! Collections encode the root as a missing id while content items always carry
//! a numeric id, so raw ids must not be compared across the two shapes.

use crate::model::{ItemId, PickerItem, PickerValue};

pub trait Identify {
    /// Comparable key, or `None` when the identity cannot be determined.
    fn identity(&self) -> Option<ItemId>;
}

impl Identify for PickerItem {
    fn identity(&self) -> Option<ItemId> {
        Some(self.id())
    }
}

impl Identify for PickerValue {
    fn identity(&self) -> Option<ItemId> {
        let model = self.model?;
        if model.is_collection() {
            Some(self.id.unwrap_or(ItemId::Root))
        } else {
            self.id
        }
    }
}

/// Identity of an optional item or value; missing input has no identity.
pub fn identity_of<T: Identify + ?Sized>(x: Option<&T>) -> Option<ItemId> {
    x.and_then(Identify::identity)
}
