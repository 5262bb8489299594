//! Seams to the external data collaborators.

use serde::{Deserialize, Serialize};

use crate::collection_index::CollectionIndex;
use crate::error::Result;
use crate::model::{Entity, ItemId, ModelKind, PickerItem};

/// Query handed to a [`SearchIndex`]. Absent fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelKind>>,
}

/// Provides the expanded collection tree of a namespace.
#[cfg_attr(test, mockall::automock)]
pub trait CollectionSource: Send + Sync {
    fn load(&self, entity: Entity) -> Result<CollectionIndex>;
}

/// Answers search queries over a namespace.
#[cfg_attr(test, mockall::automock)]
pub trait SearchIndex: Send + Sync {
    fn query(&self, entity: Entity, query: &SearchQuery) -> Result<Vec<PickerItem>>;
}
