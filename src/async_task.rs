use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::collection_index::CollectionIndex;
use crate::model::{Entity, PickerItem};
use crate::sources::{CollectionSource, SearchIndex, SearchQuery};

#[derive(Debug, Clone)]
pub enum Task {
    LoadCollections { entity: Entity },
    Search {
        entity: Entity,
        query: SearchQuery,
        cancel: CancellationToken,
    },
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    CollectionsLoaded { entity: Entity, index: CollectionIndex },
    CollectionsFailed { entity: Entity, message: String },
    SearchCompleted { query: SearchQuery, items: Vec<PickerItem> },
    SearchFailed { query: SearchQuery, message: String },
}

pub async fn run_worker(
    mut task_receiver: mpsc::Receiver<Task>,
    result_sender: mpsc::Sender<TaskResult>,
    collections: Arc<dyn CollectionSource>,
    search: Arc<dyn SearchIndex>,
) {
    while let Some(task) = task_receiver.recv().await {
        let result = match task {
            Task::LoadCollections { entity } => {
                log::debug!("📥 worker: loading {} collections", entity);
                let collections = Arc::clone(&collections);
                match tokio::task::spawn_blocking(move || collections.load(entity)).await {
                    Ok(Ok(index)) => TaskResult::CollectionsLoaded { entity, index },
                    Ok(Err(e)) => TaskResult::CollectionsFailed { entity, message: e.to_string() },
                    Err(e) => TaskResult::CollectionsFailed { entity, message: e.to_string() },
                }
            }
            Task::Search { entity, query, cancel } => {
                if cancel.is_cancelled() {
                    log::debug!("📥 worker: skipping cancelled search {:?}", query);
                    continue;
                }
                let search = Arc::clone(&search);
                let blocking_query = query.clone();
                let outcome = tokio::select! {
                    _ = cancel.cancelled() => None,
                    joined = tokio::task::spawn_blocking(move || search.query(entity, &blocking_query)) => Some(joined),
                };
                match outcome {
                    None => {
                        log::debug!("📥 worker: search cancelled while running {:?}", query);
                        continue;
                    }
                    Some(Ok(Ok(items))) => TaskResult::SearchCompleted { query, items },
                    Some(Ok(Err(e))) => TaskResult::SearchFailed { query, message: e.to_string() },
                    Some(Err(e)) => TaskResult::SearchFailed { query, message: e.to_string() },
                }
            }
        };

        if result_sender.send(result).await.is_err() {
            // Main thread has dropped the receiver, exit worker
            break;
        }
    }
}
