use crate::model::ItemId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PickerError>;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The owning collection of an item is not present in the index.
    #[error("Collection {0} is not in the index")]
    MissingCollection(ItemId),

    #[error("Load failed: {0}")]
    LoadFailure(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Error: {0}")]
    Generic(String),
}

impl From<String> for PickerError {
    fn from(error: String) -> Self {
        PickerError::Generic(error)
    }
}

impl From<&str> for PickerError {
    fn from(error: &str) -> Self {
        PickerError::Generic(error.to_string())
    }
}
