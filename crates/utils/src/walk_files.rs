use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// A regular file found under a walked root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    pub path: PathBuf,
    /// Path relative to the walked root
    pub relative: PathBuf,
}

/// Every regular file under `root`, sorted by path.
///
/// Hidden files and ignore files are not filtered: a kit ships exactly what
/// its inputs contain.
///
/// # Errors
/// Returns error if a directory cannot be read.
pub fn walk_files(root: &Path) -> io::Result<Vec<WalkedFile>> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();
    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(io::Error::other)?
            .to_path_buf();
        files.push(WalkedFile {
            path: entry.path().to_path_buf(),
            relative,
        });
    }
    Ok(files)
}

/// `relative` with `/` separators, as used in archive entry names and globs.
#[must_use]
pub fn to_slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
