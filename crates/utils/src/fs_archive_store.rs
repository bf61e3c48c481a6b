use std::path::Path;

use async_trait::async_trait;
use kitforge_core::{ArchiveStore, AssemblyError};

use crate::atomic_write;

/// `ArchiveStore` backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsArchiveStore;

#[async_trait]
impl ArchiveStore for FsArchiveStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, AssemblyError> {
        tokio::fs::read(path)
            .await
            .map_err(|error| AssemblyError::io(path, error))
    }

    async fn replace(&self, path: &Path, contents: Vec<u8>) -> Result<(), AssemblyError> {
        atomic_write(path, contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fs_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lib.jar");
        std::fs::write(&path, b"PK").unwrap();

        let store = FsArchiveStore;
        assert_eq!(store.read(&path).await.unwrap(), b"PK");
        store.replace(&path, b"PK2".to_vec()).await.unwrap();
        assert_eq!(store.read(&path).await.unwrap(), b"PK2");
    }

    #[tokio::test]
    async fn test_fs_store_read_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = FsArchiveStore.read(&temp_dir.path().join("nope.jar")).await;
        assert!(matches!(result, Err(AssemblyError::Io { .. })));
    }
}
