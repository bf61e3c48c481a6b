use std::io;
use std::path::Path;

use kitforge_core::AssemblyError;
use tokio::fs::{copy, create_dir_all};

use crate::{remove_path, walk_files};

/// Mirror the regular files under `source` into `dest`, replacing `dest` entirely.
///
/// Empty directories are not reproduced. Returns the number of files copied.
///
/// # Errors
/// Returns `AssemblyError::Io` on any filesystem failure.
pub async fn copy_tree(source: &Path, dest: &Path) -> Result<usize, AssemblyError> {
    let root = source.to_path_buf();
    let files = tokio::task::spawn_blocking(move || walk_files(&root))
        .await
        .map_err(|error| AssemblyError::io(source, io::Error::other(error)))?
        .map_err(|error| AssemblyError::io(source, error))?;

    remove_path(dest).await?;
    for file in &files {
        let target = dest.join(&file.relative);
        if let Some(parent) = target.parent() {
            create_dir_all(parent)
                .await
                .map_err(|error| AssemblyError::io(parent, error))?;
        }
        copy(&file.path, &target)
            .await
            .map_err(|error| AssemblyError::io(&file.path, error))?;
    }
    tracing::debug!(
        "Copied {} files from {} to {}",
        files.len(),
        source.display(),
        dest.display()
    );
    Ok(files.len())
}
