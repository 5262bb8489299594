//! Item shapes shared by the picker core.
//!
//! Collections and content items arrive from the data sources in one flat JSON
//! shape discriminated by `model`. Internally they are split into
//! [`CollectionNode`] and [`ContentItem`] and wrapped in [`PickerItem`].

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{PickerError, Result};

const ROOT_KEY: &str = "root";

/// Identifier of a collection or content item. The root collection has no
/// numeric id and is represented by its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemId {
    Root,
    Id(u64),
}

impl ItemId {
    pub fn is_root(&self) -> bool {
        matches!(self, ItemId::Root)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Root => f.write_str(ROOT_KEY),
            ItemId::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for ItemId {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        if s == ROOT_KEY {
            return Ok(ItemId::Root);
        }
        s.parse::<u64>()
            .map(ItemId::Id)
            .map_err(|_| PickerError::Generic(format!("invalid item id: {}", s)))
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ItemId::Root => serializer.serialize_str(ROOT_KEY),
            ItemId::Id(id) => serializer.serialize_u64(*id),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemId {
    Num(u64),
    Str(String),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawItemId::deserialize(deserializer)? {
            RawItemId::Num(id) => Ok(ItemId::Id(id)),
            RawItemId::Str(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// Collection ids use `null` for the root collection.
fn deserialize_collection_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<ItemId, D::Error> {
    Ok(Option::<ItemId>::deserialize(deserializer)?.unwrap_or(ItemId::Root))
}

/// Kinds of entity a picker can list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Collection,
    Card,
    Dataset,
    Metric,
    Dashboard,
    Snippet,
}

impl ModelKind {
    pub fn is_collection(&self) -> bool {
        matches!(self, ModelKind::Collection)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Collection => "collection",
            ModelKind::Card => "card",
            ModelKind::Dataset => "dataset",
            ModelKind::Metric => "metric",
            ModelKind::Dashboard => "dashboard",
            ModelKind::Snippet => "snippet",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backing namespace a picker browses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    #[default]
    Collections,
    Snippets,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Collections => f.write_str("collections"),
            Entity::Snippets => f.write_str("snippets"),
        }
    }
}

/// The non-empty, ordered set of model kinds the host allows picking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ModelKind>", into = "Vec<ModelKind>")]
pub struct ModelSet(Vec<ModelKind>);

impl ModelSet {
    pub fn new(models: impl IntoIterator<Item = ModelKind>) -> Result<Self> {
        let mut unique: Vec<ModelKind> = Vec::new();
        for model in models {
            if !unique.contains(&model) {
                unique.push(model);
            }
        }
        if unique.is_empty() {
            return Err(PickerError::Config(
                "at least one selectable model is required".to_string(),
            ));
        }
        Ok(Self(unique))
    }

    pub fn collections_only() -> Self {
        Self(vec![ModelKind::Collection])
    }

    pub fn contains(&self, model: ModelKind) -> bool {
        self.0.contains(&model)
    }

    pub fn picks_collections(&self) -> bool {
        self.contains(ModelKind::Collection)
    }

    /// True when any model other than `collection` is requested.
    pub fn picks_content(&self) -> bool {
        self.0.iter().any(|model| !model.is_collection())
    }

    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ModelKind] {
        &self.0
    }
}

impl Default for ModelSet {
    fn default() -> Self {
        Self::collections_only()
    }
}

impl TryFrom<Vec<ModelKind>> for ModelSet {
    type Error = PickerError;

    fn try_from(models: Vec<ModelKind>) -> Result<Self> {
        Self::new(models)
    }
}

impl From<ModelSet> for Vec<ModelKind> {
    fn from(models: ModelSet) -> Self {
        models.0
    }
}

/// A node in the collection hierarchy. `children == None` means the children
/// have not been loaded, which is different from having none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNode {
    #[serde(deserialize_with = "deserialize_collection_id", default = "root_id")]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub can_write: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CollectionNode>>,
    /// Parent collection, when the source reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<ItemId>,
}

fn root_id() -> ItemId {
    ItemId::Root
}

impl CollectionNode {
    pub fn new(id: ItemId, name: impl Into<String>, can_write: bool) -> Self {
        Self {
            id,
            name: name.into(),
            can_write,
            children: None,
            collection_id: None,
        }
    }

    pub fn root(name: impl Into<String>, can_write: bool) -> Self {
        Self::new(ItemId::Root, name, can_write)
    }

    /// Builder-style child registration; marks the children as loaded.
    pub fn with_child(mut self, child: CollectionNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Marks the children as loaded even if there are none.
    pub fn with_no_children(mut self) -> Self {
        self.children.get_or_insert_with(Vec::new);
        self
    }

    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    pub fn children(&self) -> &[CollectionNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_known_children(&self) -> bool {
        !self.children().is_empty()
    }
}

/// A non-collection entity living in exactly one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    pub model: ModelKind,
    #[serde(default)]
    pub name: String,
    /// `None` means the item lives in the root collection.
    #[serde(default)]
    pub collection_id: Option<ItemId>,
}

impl ContentItem {
    pub fn new(id: u64, model: ModelKind, name: impl Into<String>, collection_id: Option<ItemId>) -> Self {
        Self {
            id,
            model,
            name: name.into(),
            collection_id,
        }
    }
}

/// Anything that can be rendered as a picker row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPickerItem", into = "RawPickerItem")]
pub enum PickerItem {
    Collection(CollectionNode),
    Content(ContentItem),
}

impl PickerItem {
    pub fn model(&self) -> ModelKind {
        match self {
            PickerItem::Collection(_) => ModelKind::Collection,
            PickerItem::Content(item) => item.model,
        }
    }

    pub fn id(&self) -> ItemId {
        match self {
            PickerItem::Collection(node) => node.id,
            PickerItem::Content(item) => ItemId::Id(item.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PickerItem::Collection(node) => &node.name,
            PickerItem::Content(item) => &item.name,
        }
    }

    /// The collection this item lives in (`None` = root).
    pub fn collection_id(&self) -> Option<ItemId> {
        match self {
            PickerItem::Collection(node) => node.collection_id,
            PickerItem::Content(item) => item.collection_id,
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionNode> {
        match self {
            PickerItem::Collection(node) => Some(node),
            PickerItem::Content(_) => None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.as_collection().is_some_and(CollectionNode::is_root)
    }
}

impl From<CollectionNode> for PickerItem {
    fn from(node: CollectionNode) -> Self {
        PickerItem::Collection(node)
    }
}

impl From<ContentItem> for PickerItem {
    fn from(item: ContentItem) -> Self {
        PickerItem::Content(item)
    }
}

/// Wire shape of a [`PickerItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPickerItem {
    #[serde(default)]
    id: Option<ItemId>,
    model: ModelKind,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    can_write: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<CollectionNode>>,
    #[serde(default)]
    collection_id: Option<ItemId>,
}

impl TryFrom<RawPickerItem> for PickerItem {
    type Error = String;

    fn try_from(raw: RawPickerItem) -> std::result::Result<Self, Self::Error> {
        if raw.model.is_collection() {
            return Ok(PickerItem::Collection(CollectionNode {
                id: raw.id.unwrap_or(ItemId::Root),
                name: raw.name,
                can_write: raw.can_write.unwrap_or(false),
                children: raw.children,
                collection_id: raw.collection_id,
            }));
        }
        match raw.id {
            Some(ItemId::Id(id)) => Ok(PickerItem::Content(ContentItem {
                id,
                model: raw.model,
                name: raw.name,
                collection_id: raw.collection_id,
            })),
            other => Err(format!("{} item has no numeric id (got {:?})", raw.model, other)),
        }
    }
}

impl From<PickerItem> for RawPickerItem {
    fn from(item: PickerItem) -> Self {
        match item {
            PickerItem::Collection(node) => RawPickerItem {
                id: if node.is_root() { None } else { Some(node.id) },
                model: ModelKind::Collection,
                name: node.name,
                can_write: Some(node.can_write),
                children: node.children,
                collection_id: node.collection_id,
            },
            PickerItem::Content(item) => RawPickerItem {
                id: Some(ItemId::Id(item.id)),
                model: item.model,
                name: item.name,
                can_write: None,
                children: None,
                collection_id: item.collection_id,
            },
        }
    }
}

/// The externally held selection. May be a bare `{ id, model }` stub, and may
/// be malformed (missing either field).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerValue {
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub model: Option<ModelKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<ItemId>,
}

impl PickerValue {
    pub fn new(id: ItemId, model: ModelKind) -> Self {
        Self {
            id: Some(id),
            model: Some(model),
            name: None,
            collection_id: None,
        }
    }

    /// The root collection as a value: `{ id: null, model: "collection" }`.
    pub fn root() -> Self {
        Self {
            id: None,
            model: Some(ModelKind::Collection),
            name: None,
            collection_id: None,
        }
    }
}

impl From<&PickerItem> for PickerValue {
    fn from(item: &PickerItem) -> Self {
        if item.is_root() {
            return Self {
                name: Some(item.name().to_string()),
                ..Self::root()
            };
        }
        Self {
            id: Some(item.id()),
            model: Some(item.model()),
            name: Some(item.name().to_string()),
            collection_id: item.collection_id(),
        }
    }
}
