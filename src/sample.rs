//! Built-in demo catalog, used when no catalog file is given and by tests.

use crate::catalog::{Catalog, Namespace};
use crate::model::{CollectionNode, ContentItem, Entity, ItemId, ModelKind};

/// ```text
/// collections
///   root "Our analytics" (writable)
///     1 Marketing (writable)
///       4 Campaigns (writable)
///     2 Finance (read only)
///       5 Forecasts (writable)
///     3 Archive (read only)
///       6 Old reports (read only)
/// snippets
///   root "Top folder" (writable)
///     100 SQL helpers (writable)
/// ```
pub fn sample_catalog() -> Catalog {
    let collections_root = CollectionNode::root("Our analytics", true)
        .with_child(
            CollectionNode::new(ItemId::Id(1), "Marketing", true)
                .with_child(CollectionNode::new(ItemId::Id(4), "Campaigns", true).with_no_children()),
        )
        .with_child(
            CollectionNode::new(ItemId::Id(2), "Finance", false)
                .with_child(CollectionNode::new(ItemId::Id(5), "Forecasts", true).with_no_children()),
        )
        .with_child(
            CollectionNode::new(ItemId::Id(3), "Archive", false)
                .with_child(CollectionNode::new(ItemId::Id(6), "Old reports", false).with_no_children()),
        );

    let collection_items = vec![
        ContentItem::new(10, ModelKind::Card, "Sales by region", Some(ItemId::Id(1))),
        ContentItem::new(11, ModelKind::Card, "Revenue forecast", Some(ItemId::Id(5))),
        ContentItem::new(12, ModelKind::Card, "Legacy sales", Some(ItemId::Id(6))),
        ContentItem::new(13, ModelKind::Card, "Orphaned question", Some(ItemId::Id(99))),
        ContentItem::new(20, ModelKind::Dashboard, "Sales overview", None),
        ContentItem::new(21, ModelKind::Dashboard, "Campaign health", Some(ItemId::Id(4))),
        ContentItem::new(30, ModelKind::Dataset, "Orders model", Some(ItemId::Id(2))),
        ContentItem::new(31, ModelKind::Dataset, "Sales pipeline", Some(ItemId::Id(1))),
    ];

    let snippets_root = CollectionNode::root("Top folder", true)
        .with_child(CollectionNode::new(ItemId::Id(100), "SQL helpers", true).with_no_children());
    let snippet_items = vec![
        ContentItem::new(200, ModelKind::Snippet, "Date filter", Some(ItemId::Id(100))),
        ContentItem::new(201, ModelKind::Snippet, "Active customers", None),
    ];

    Catalog::new()
        .with_namespace(
            Entity::Collections,
            Namespace {
                root: collections_root,
                items: collection_items,
            },
        )
        .with_namespace(
            Entity::Snippets,
            Namespace {
                root: snippets_root,
                items: snippet_items,
            },
        )
}
