// Glue between the picker state, the worker channel and the frontend

use tokio::sync::mpsc;

use crate::async_task::{Task, TaskResult};
use crate::picker::Picker;

pub fn handle_task_result(picker: &mut Picker, result: TaskResult) {
    match result {
        TaskResult::CollectionsLoaded { entity, index } => {
            picker.set_index(entity, index);
        }
        TaskResult::CollectionsFailed { entity, message } => {
            log::error!("📨 collections for {} failed to load: {}", entity, message);
            if entity == picker.config().entity {
                picker.index_failed(&message);
            }
        }
        TaskResult::SearchCompleted { query, items } => {
            if !picker.apply_search_results(&query, items) {
                // Async result is stale - ignore it
                log::debug!("📨 ignoring search results for superseded query {:?}", query);
            }
        }
        TaskResult::SearchFailed { query, message } => {
            log::error!("📨 search {:?} failed: {}", query, message);
            picker.search_failed(&query, &message);
        }
    }
}

/// Send the search the current state needs, if it differs from the one
/// already issued.
pub fn dispatch_search(picker: &mut Picker, task_sender: &mpsc::Sender<Task>) {
    let Some((query, cancel)) = picker.refresh_search() else {
        return;
    };
    let task = Task::Search {
        entity: picker.config().entity,
        query,
        cancel,
    };
    if let Err(e) = task_sender.try_send(task) {
        log::error!("📤 failed to queue search: {}", e);
        picker.status_message = format!("Failed to start search: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection_index::CollectionIndex;
    use crate::config::PickerConfig;
    use crate::model::{CollectionNode, ContentItem, Entity, ItemId, ModelKind, PickerItem};

    fn create_content_picker() -> Picker {
        let mut picker = Picker::new(PickerConfig::new([ModelKind::Card]).unwrap());
        handle_task_result(
            &mut picker,
            TaskResult::CollectionsLoaded {
                entity: Entity::Collections,
                index: CollectionIndex::from_root(CollectionNode::root("Our analytics", true).with_no_children()),
            },
        );
        picker
    }

    #[test]
    fn test_dispatch_and_apply_search() {
        let mut picker = create_content_picker();
        let (task_sender, mut task_receiver) = mpsc::channel::<Task>(4);

        dispatch_search(&mut picker, &task_sender);
        let Ok(Task::Search { query, .. }) = task_receiver.try_recv() else {
            panic!("expected a search task");
        };
        // Nothing new to send for an unchanged state
        dispatch_search(&mut picker, &task_sender);
        assert!(task_receiver.try_recv().is_err());

        handle_task_result(
            &mut picker,
            TaskResult::SearchCompleted {
                query,
                items: vec![PickerItem::from(ContentItem::new(3, ModelKind::Card, "Orders", None))],
            },
        );
        assert_eq!(picker.rows().len(), 1);
        assert_eq!(picker.rows()[0].item.id(), ItemId::Id(3));
    }

    #[test]
    fn test_failed_load_keeps_tree_empty() {
        let mut picker = Picker::new(PickerConfig::default());
        handle_task_result(
            &mut picker,
            TaskResult::CollectionsFailed {
                entity: Entity::Collections,
                message: "timeout".to_string(),
            },
        );
        assert!(picker.rows().is_empty());
        assert!(picker.status_message.contains("timeout"));
    }

    #[test]
    fn test_failed_search_renders_nothing() {
        let mut picker = create_content_picker();
        let (query, _) = picker.refresh_search().unwrap();
        handle_task_result(
            &mut picker,
            TaskResult::SearchFailed {
                query,
                message: "503".to_string(),
            },
        );
        assert!(picker.rows().is_empty());
        assert_eq!(picker.status_message, "Search failed: 503");
        assert!(!picker.is_loading_search());
    }
}
