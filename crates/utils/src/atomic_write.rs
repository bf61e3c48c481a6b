use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use kitforge_core::AssemblyError;
use tempfile::NamedTempFile;

/// Replace `path` with `contents` through a temporary sibling file and a rename.
///
/// Readers observe either the old or the new file, never a partial one. The
/// permissions of an existing file are carried over.
///
/// # Errors
/// Returns `AssemblyError::Io` if the temporary file cannot be written or renamed.
pub async fn atomic_write(path: &Path, contents: Vec<u8>) -> Result<(), AssemblyError> {
    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_and_persist(&target, &contents))
        .await
        .map_err(|error| AssemblyError::io(path, io::Error::other(error)))?
}

fn write_and_persist(path: &Path, contents: &[u8]) -> Result<(), AssemblyError> {
    let dir = parent_dir(path);
    let mut temp = NamedTempFile::new_in(&dir).map_err(|error| AssemblyError::io(&dir, error))?;
    temp.write_all(contents)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|error| AssemblyError::io(temp.path(), error))?;
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|error| AssemblyError::io(temp.path(), error))?;
    }
    temp.persist(path)
        .map_err(|error| AssemblyError::io(path, error.error))?;
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
