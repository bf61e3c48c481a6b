use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::{ArtifactKind, AssemblyError};

/// A resolved file, identified by its file name inside the assembly directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    file_name: String,
    path: PathBuf,
    kind: ArtifactKind,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let file_name = file_name.into();
        let kind = ArtifactKind::from_file_name(&file_name);
        Self {
            file_name,
            path: path.into(),
            kind,
        }
    }

    /// Build an artifact keyed by the last component of `path`.
    ///
    /// # Errors
    /// Returns error if the path has no usable UTF-8 file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, AssemblyError> {
        let path = path.into();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AssemblyError::io(
                    &path,
                    io::Error::new(io::ErrorKind::InvalidInput, "artifact path has no file name"),
                )
            })?;
        Ok(Self::new(file_name, path))
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }
}

impl Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format!("[{}]", self.kind).bright_blue().bold(),
            self.file_name.bright_white().bold(),
            "→".bright_cyan(),
            self.path.display().to_string().bright_black()
        )
    }
}
