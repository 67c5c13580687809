use crate::{
    error::{Result, StoreError},
    storage::Storage,
};
use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;

/// File-based storage: one JSON file per key under a root directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const DATA_DIR: &'static str = ".schedule";
    const EXTENSION: &'static str = "json";

    /// Creates a new FileStorage rooted in `<base>/.schedule`
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            root_path: base.as_ref().join(Self::DATA_DIR),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn key_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.root_path.join(format!("{key}.{}", Self::EXTENSION)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let file_path = self.key_file(key)?;

        match fs::read(&file_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let file_path = self.key_file(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        // Write beside the target and rename so a crash never leaves half a snapshot
        let tmp_path = file_path.with_extension("tmp");
        fs::write(&tmp_path, bytes).await?;
        if let Err(err) = fs::rename(&tmp_path, &file_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err.into());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file_path = self.key_file(key)?;

        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.read("protocols").await.unwrap().is_none());
        assert!(!storage.root_path().exists());
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.write("protocols", b"{\"groups\":[]}").await.unwrap();
        assert!(storage.root_path().join("protocols.json").exists());

        let bytes = storage.read("protocols").await.unwrap().unwrap();
        assert_eq!(bytes, b"{\"groups\":[]}");
    }

    #[tokio::test]
    async fn test_write_replaces_previous_blob() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.write("k", b"first").await.unwrap();
        storage.write("k", b"second").await.unwrap();

        assert_eq!(storage.read("k").await.unwrap().unwrap(), b"second");
        assert!(!storage.root_path().join("k.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_rename_cleans_up_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        // A non-empty directory in place of the target file makes the rename fail
        let blocker = storage.root_path().join("k.json");
        std::fs::create_dir_all(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), b"x").unwrap();

        let err = storage.write("k", b"data").await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(!storage.root_path().join("k.tmp").exists());
        assert!(blocker.join("keep").exists());
    }

    #[tokio::test]
    async fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.write("k", b"x").await.unwrap();
        storage.remove("k").await.unwrap();
        assert!(storage.read("k").await.unwrap().is_none());

        // Removing again is fine
        storage.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            let err = storage.write(key, b"x").await.unwrap_err();
            assert!(matches!(err, StoreError::Storage(_)), "key {key:?}");
        }
    }
}
