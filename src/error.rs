use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Item not found: {item} in group {group}")]
    ItemNotFound { group: String, item: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True for failures of the write-through to the backing storage
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io(_) | Self::Serialization(_))
    }

    /// True when a referenced id does not exist in its scope
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GroupNotFound(_) | Self::ItemNotFound { .. })
    }
}
