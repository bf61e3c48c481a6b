use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Malformed `META-INF/MANIFEST.MF` content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("manifest is not valid UTF-8")]
    InvalidUtf8,
    #[error("line {line}: line is longer than 512 bytes")]
    LineTooLong { line: usize },
    #[error("line {line}: header is missing the \": \" separator")]
    MissingSeparator { line: usize },
    #[error("line {line}: invalid header name {name:?}")]
    InvalidName { line: usize, name: String },
    #[error("line {line}: continuation line without a preceding header")]
    OrphanContinuation { line: usize },
    #[error("line {line}: section does not start with a Name header")]
    MissingSectionName { line: usize },
}

/// Failures of a classpath assembly. All of them abort the invocation.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("failed to open archive {}: {source}", path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("failed to parse manifest of {}: {reason}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        reason: ManifestError,
    },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("artifact file name {file_name} is resolved more than once")]
    DuplicateArtifact { file_name: String },
    #[error("resolved artifact {} does not exist", path.display())]
    MissingArtifact { path: PathBuf },
}

impl AssemblyError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn archive(path: impl AsRef<Path>, source: zip::result::ZipError) -> Self {
        Self::ArchiveOpen {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn manifest(path: impl AsRef<Path>, reason: ManifestError) -> Self {
        Self::ManifestParse {
            path: path.as_ref().to_path_buf(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_parse_message_includes_path_and_line() {
        let error = AssemblyError::manifest(
            "/out/app.jar",
            ManifestError::MissingSeparator { line: 3 },
        );
        let message = error.to_string();
        assert!(message.contains("/out/app.jar"));
        assert!(message.contains("line 3"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let error = AssemblyError::io(
            "/out",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("denied"));
    }

    #[test]
    fn test_duplicate_artifact_message() {
        let error = AssemblyError::DuplicateArtifact {
            file_name: "lib.jar".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "artifact file name lib.jar is resolved more than once"
        );
    }
}
