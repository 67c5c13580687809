use crate::error::Result;
use async_trait::async_trait;

pub mod file_storage;
pub mod memory_storage;
pub mod snapshot;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use snapshot::Snapshot;

/// Key-value byte store holding persisted snapshots
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the blob stored under `key`, if any
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the blob stored under `key`
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Removes `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
