use std::collections::HashSet;
use std::path::Path;

use kitforge_core::AssemblyError;
use tokio::fs::{copy, create_dir_all, metadata, read_dir};

use crate::{copy_tree, remove_path};

/// Result of mirroring a set of named files into a directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub copied: Vec<String>,
    pub removed: Vec<String>,
}

/// Make `dest` contain exactly `entries`, each under its given name.
///
/// Entries are copied in order; a directory entry is copied as a tree. Any
/// other top-level entry of `dest` is removed afterwards, so leftovers from a
/// previous run never survive.
///
/// # Errors
/// Returns `AssemblyError::Io` on any filesystem failure.
pub async fn sync_files(
    entries: &[(&str, &Path)],
    dest: &Path,
) -> Result<SyncOutcome, AssemblyError> {
    create_dir_all(dest)
        .await
        .map_err(|error| AssemblyError::io(dest, error))?;

    let mut outcome = SyncOutcome::default();
    for (name, source) in entries {
        let target = dest.join(name);
        let source_metadata = metadata(source)
            .await
            .map_err(|error| AssemblyError::io(source, error))?;
        if source_metadata.is_dir() {
            copy_tree(source, &target).await?;
        } else {
            // read-only leftovers and directories in the way must go first
            remove_path(&target).await?;
            copy(source, &target)
                .await
                .map_err(|error| AssemblyError::io(source, error))?;
        }
        tracing::debug!("Copied {} to {}", source.display(), target.display());
        outcome.copied.push((*name).to_string());
    }

    let keep: HashSet<&str> = entries.iter().map(|(name, _)| *name).collect();
    let mut existing = read_dir(dest)
        .await
        .map_err(|error| AssemblyError::io(dest, error))?;
    let mut stale = Vec::new();
    while let Some(entry) = existing
        .next_entry()
        .await
        .map_err(|error| AssemblyError::io(dest, error))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !keep.contains(name.as_str()) {
            stale.push((name, entry.path()));
        }
    }
    stale.sort();
    for (name, path) in stale {
        remove_path(&path).await?;
        tracing::debug!("Removed stale {}", path.display());
        outcome.removed.push(name);
    }
    Ok(outcome)
}
