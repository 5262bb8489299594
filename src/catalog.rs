//! File-backed collection tree and search index.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use crate::collection_index::CollectionIndex;
use crate::error::{PickerError, Result};
use crate::model::{CollectionNode, ContentItem, Entity, ItemId, PickerItem};
use crate::sources::{CollectionSource, SearchIndex, SearchQuery};

/// One browsable namespace: a collection tree plus the content stored in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub root: CollectionNode,
    #[serde(default)]
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    namespaces: HashMap<Entity, Namespace>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, entity: Entity, namespace: Namespace) -> Self {
        self.namespaces.insert(entity, namespace);
        self
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PickerError::LoadFailure(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        log::info!(
            "Catalog::load_from_file: loaded {} namespaces from {}",
            catalog.namespaces.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn namespace(&self, entity: Entity) -> Result<&Namespace> {
        self.namespaces
            .get(&entity)
            .ok_or_else(|| PickerError::LoadFailure(format!("Catalog has no {} namespace", entity)))
    }

    /// Every searchable item of a namespace. Collections carry their parent
    /// id; the root itself is not searchable.
    fn searchable_items(namespace: &Namespace) -> Vec<PickerItem> {
        let mut items = Vec::new();
        Self::collect_collections(&namespace.root, &mut items);
        items.extend(namespace.items.iter().cloned().map(PickerItem::Content));
        items
    }

    fn collect_collections(parent: &CollectionNode, items: &mut Vec<PickerItem>) {
        for child in parent.children() {
            let mut node = child.clone();
            node.collection_id = Some(node.collection_id.unwrap_or(parent.id));
            items.push(PickerItem::Collection(node));
            Self::collect_collections(child, items);
        }
    }
}

impl CollectionSource for Catalog {
    fn load(&self, entity: Entity) -> Result<CollectionIndex> {
        let namespace = self.namespace(entity)?;
        Ok(CollectionIndex::from_root(namespace.root.clone()))
    }
}

impl SearchIndex for Catalog {
    fn query(&self, entity: Entity, query: &SearchQuery) -> Result<Vec<PickerItem>> {
        let start = Instant::now();
        let namespace = self.namespace(entity)?;

        let filtered = Self::searchable_items(namespace).into_iter().filter(|item| {
            let in_collection = query
                .collection
                .map_or(true, |collection| item.collection_id().unwrap_or(ItemId::Root) == collection);
            let wanted_model = query
                .models
                .as_ref()
                .map_or(true, |models| models.contains(&item.model()));
            in_collection && wanted_model
        });

        let results = match query.q.as_deref().filter(|q| !q.is_empty()) {
            Some(q) => {
                let matcher = SkimMatcherV2::default().ignore_case();
                let mut scored: Vec<(i64, PickerItem)> = filtered
                    .filter_map(|item| matcher.fuzzy_match(item.name(), q).map(|score| (score, item)))
                    .collect();
                scored.sort_by(|(a_score, a), (b_score, b)| {
                    b_score.cmp(a_score).then_with(|| a.name().cmp(b.name()))
                });
                scored.into_iter().map(|(_, item)| item).collect()
            }
            None => filtered.collect::<Vec<_>>(),
        };

        log::debug!(
            "Catalog::query: {:?} in {} matched {} items in {:?}",
            query,
            entity,
            results.len(),
            start.elapsed()
        );
        Ok(results)
    }
}
