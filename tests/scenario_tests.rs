use assert_matches::assert_matches;
use collection_picker::candidates::{build_search_query, resolve_candidates};
use collection_picker::collection_index::CollectionIndex;
use collection_picker::config::PickerConfig;
use collection_picker::model::{
    CollectionNode, ContentItem, Entity, ItemId, ModelKind, ModelSet, PickerItem, PickerValue,
};
use collection_picker::navigator::{NavigationState, NavigatorEvent, NavigatorMode};
use collection_picker::picker::Picker;
use collection_picker::sample::sample_catalog;
use collection_picker::screenshot::load_picker;
use collection_picker::selection::{is_selected, Activation, Section};
use collection_picker::sources::SearchQuery;

// Test utilities
fn two_child_index() -> CollectionIndex {
    // root
    //   A (writable)
    //   B (read only, no writable descendants)
    let root = CollectionNode::root("Our analytics", true)
        .with_child(CollectionNode::new(ItemId::Id(1), "A", true).with_no_children())
        .with_child(
            CollectionNode::new(ItemId::Id(2), "B", false)
                .with_child(CollectionNode::new(ItemId::Id(3), "B inner", false).with_no_children()),
        );
    CollectionIndex::from_root(root)
}

fn loaded_picker(config: PickerConfig, index: CollectionIndex) -> Picker {
    let mut picker = Picker::new(config);
    picker.set_index(Entity::Collections, index);
    picker
}

#[test]
fn test_scenario_collections_tree_excludes_dead_branch() {
    let index = two_child_index();
    let candidates = resolve_candidates(&NavigationState::new(), &ModelSet::collections_only(), Some(&index));

    let ids: Vec<ItemId> = candidates.tree.unwrap().iter().map(PickerItem::id).collect();
    assert_eq!(ids, vec![ItemId::Root, ItemId::Id(1)]);
    assert_eq!(candidates.search, None);
}

#[test]
fn test_scenario_content_model_searches_with_empty_string() {
    let models = ModelSet::new([ModelKind::Card]).unwrap();
    let candidates = resolve_candidates(&NavigationState::new(), &models, None);

    assert_eq!(candidates.mode(), NavigatorMode::Search);
    assert_eq!(
        candidates.search,
        Some(SearchQuery {
            q: None,
            collection: Some(ItemId::Root),
            models: Some(vec![ModelKind::Card]),
        })
    );
}

#[test]
fn test_scenario_committed_search_drops_collection_filter() {
    let models = ModelSet::new([ModelKind::Card, ModelKind::Dashboard]).unwrap();
    let mut nav = NavigationState::new();
    nav.handle_event(NavigatorEvent::OpenCollection(ItemId::Id(5)));
    nav.handle_event(NavigatorEvent::OpenSearch);
    nav.handle_event(NavigatorEvent::SubmitSearch("sales".to_string()));

    assert_eq!(
        build_search_query(&nav, &models),
        Some(SearchQuery {
            q: Some("sales".to_string()),
            collection: None,
            models: None,
        })
    );
}

#[test]
fn test_scenario_activation_navigates_or_selects() {
    // root
    //   1 Locked (read only) with writable child 3
    //   2 Open (writable)
    let index = CollectionIndex::from_root(
        CollectionNode::root("Our analytics", true)
            .with_child(
                CollectionNode::new(ItemId::Id(1), "Locked", false)
                    .with_child(CollectionNode::new(ItemId::Id(3), "Inner", true).with_no_children()),
            )
            .with_child(CollectionNode::new(ItemId::Id(2), "Open", true).with_no_children()),
    );
    let mut picker = loaded_picker(PickerConfig::default(), index);
    let rows = picker.rows();

    let locked = rows.iter().find(|row| row.item.id() == ItemId::Id(1)).unwrap().clone();
    assert_eq!(picker.activate(&locked), Some(Activation::Navigate(ItemId::Id(1))));
    assert_eq!(picker.navigation().open_collection_id(), ItemId::Id(1));
    assert_eq!(picker.value(), None);

    picker.go_up();
    let open = picker
        .rows()
        .into_iter()
        .find(|row| row.item.id() == ItemId::Id(2))
        .unwrap();
    assert_matches!(
        picker.activate(&open),
        Some(Activation::Select(PickerValue { id: Some(ItemId::Id(2)), .. }))
    );
}

#[test]
fn test_scenario_null_value_highlights_root_row() {
    let config = PickerConfig::default().with_value(PickerValue::root());
    let picker = loaded_picker(config, two_child_index());

    let root_row = picker.rows().into_iter().find(|row| row.item.is_root()).unwrap();
    assert!(root_row.selected);
    assert_eq!(picker.rows().iter().filter(|row| row.selected).count(), 1);
}

#[test]
fn test_round_trip_selection_marks_only_that_item() {
    let catalog = sample_catalog();
    let config = PickerConfig::new([ModelKind::Card, ModelKind::Dataset]).unwrap();
    let mut picker = load_picker(&catalog, config.clone()).unwrap();

    // Marketing holds a card (10) and a dataset (31)
    picker.open_collection(ItemId::Id(1));
    let (query, _) = picker.refresh_search().unwrap();
    let items = collection_picker::sources::SearchIndex::query(&catalog, Entity::Collections, &query).unwrap();
    picker.apply_search_results(&query, items);

    let card_row = picker
        .rows()
        .into_iter()
        .find(|row| row.section == Section::Search && row.item.id() == ItemId::Id(10))
        .unwrap();
    let Some(Activation::Select(value)) = picker.activate(&card_row) else {
        panic!("card should be selectable");
    };

    // Reopen with the emitted value
    let mut reopened = load_picker(&catalog, config.with_value(value)).unwrap();
    reopened.open_collection(ItemId::Id(1));
    let (query, _) = reopened.refresh_search().unwrap();
    let items = collection_picker::sources::SearchIndex::query(&catalog, Entity::Collections, &query).unwrap();
    reopened.apply_search_results(&query, items);

    let selected: Vec<ItemId> = reopened
        .rows()
        .iter()
        .filter(|row| row.selected)
        .map(|row| row.item.id())
        .collect();
    assert_eq!(selected, vec![ItemId::Id(10)]);
}

#[test]
fn test_same_id_different_model_not_selected_with_several_models() {
    let models = ModelSet::new([ModelKind::Card, ModelKind::Dashboard]).unwrap();
    let value = PickerValue::new(ItemId::Id(10), ModelKind::Card);
    let dashboard = PickerItem::from(ContentItem::new(10, ModelKind::Dashboard, "Same id", None));
    assert!(!is_selected(&dashboard, Some(&value), &models));
}

#[test]
fn test_card_value_does_not_mark_collection_with_same_id() {
    let index = CollectionIndex::from_root(
        CollectionNode::root("Our analytics", true)
            .with_child(CollectionNode::new(ItemId::Id(5), "Shared", true).with_no_children()),
    );
    let config = PickerConfig::new([ModelKind::Card])
        .unwrap()
        .with_value(PickerValue::new(ItemId::Id(5), ModelKind::Card));
    let mut picker = loaded_picker(config, index);

    let (query, _) = picker.refresh_search().unwrap();
    let card = PickerItem::from(ContentItem::new(5, ModelKind::Card, "Shared numbers", None));
    assert!(picker.apply_search_results(&query, vec![card]));

    let rows = picker.rows();
    let collection = rows.iter().find(|row| row.section == Section::Tree).unwrap();
    assert_eq!(collection.item.id(), ItemId::Id(5));
    assert!(!collection.selectable);
    assert!(!collection.selected);

    let selected: Vec<(ItemId, ModelKind)> = rows
        .iter()
        .filter(|row| row.selected)
        .map(|row| (row.item.id(), row.item.model()))
        .collect();
    assert_eq!(selected, vec![(ItemId::Id(5), ModelKind::Card)]);
}

#[test]
fn test_read_only_root_never_marked() {
    let index = CollectionIndex::from_root(
        CollectionNode::root("Our analytics", false)
            .with_child(CollectionNode::new(ItemId::Id(1), "A", true).with_no_children()),
    );
    let config = PickerConfig::default().with_value(PickerValue::root());
    let picker = loaded_picker(config, index);

    let root_row = picker.rows().into_iter().find(|row| row.item.is_root()).unwrap();
    assert!(!root_row.selectable);
    assert!(!root_row.selected);
}

#[test]
fn test_snippet_namespace() {
    let config = PickerConfig::new([ModelKind::Snippet])
        .unwrap()
        .with_entity(Entity::Snippets);
    let picker = load_picker(&sample_catalog(), config).unwrap();

    let names: Vec<String> = picker.rows().iter().map(|row| row.item.name().to_string()).collect();
    assert_eq!(names, vec!["SQL helpers", "Active customers"]);
    assert_eq!(picker.crumbs()[0].name, "Top folder");
}
