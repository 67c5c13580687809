use crate::{
    error::{Result, StoreError},
    storage::Storage,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

/// In-process storage, optionally limited to a total number of bytes.
///
/// With a quota set, a write that would push the stored total past it fails
/// and leaves the previous blob in place, like a full browser storage area.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::default(),
            quota: Some(quota),
        }
    }

    /// Total bytes currently stored
    pub fn used_bytes(&self) -> usize {
        self.entries()
            .map(|entries| entries.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Storage("memory storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let mut entries = self.entries()?;

        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if others + bytes.len() > quota {
                return Err(StoreError::Storage(format!(
                    "quota exceeded: {} bytes requested, {} available",
                    bytes.len(),
                    quota.saturating_sub(others)
                )));
            }
        }

        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
