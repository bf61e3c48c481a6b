use std::io;
use std::path::Path;

use kitforge_core::AssemblyError;
use tokio::fs::{remove_dir_all, remove_file, symlink_metadata};

/// Remove a file or directory tree; a missing path is not an error.
///
/// # Errors
/// Returns `AssemblyError::Io` if the path exists but cannot be removed.
pub async fn remove_path(path: &Path) -> Result<bool, AssemblyError> {
    let metadata = match symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(error) => return Err(AssemblyError::io(path, error)),
    };
    let result = if metadata.is_dir() {
        remove_dir_all(path).await
    } else {
        remove_file(path).await
    };
    result.map_err(|error| AssemblyError::io(path, error))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_remove_path_file_and_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.jar");
        let dir = temp_dir.path().join("config");
        fs::write(&file, "a").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/app.conf"), "x").unwrap();

        assert!(remove_path(&file).await.unwrap());
        assert!(remove_path(&dir).await.unwrap());
        assert!(!file.exists());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_remove_path_missing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!remove_path(&temp_dir.path().join("missing")).await.unwrap());
    }
}
