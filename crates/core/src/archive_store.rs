use std::path::Path;

use async_trait::async_trait;

use crate::AssemblyError;

/// Where jar bytes are read from and atomically written back to.
///
/// The assembler never edits an archive in place: it reads the whole jar,
/// builds a new one in memory and hands it to `replace`, which must either
/// fully substitute the old contents or leave them untouched.
#[async_trait]
pub trait ArchiveStore: std::fmt::Debug + Send + Sync {
    /// # Errors
    /// Returns error if the archive cannot be read.
    async fn read(&self, path: &Path) -> Result<Vec<u8>, AssemblyError>;

    /// # Errors
    /// Returns error if the new contents cannot be written; the old contents
    /// must then still be in place.
    async fn replace(&self, path: &Path, contents: Vec<u8>) -> Result<(), AssemblyError>;
}

