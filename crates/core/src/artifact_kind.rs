use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How an artifact is materialized into an assembly directory.
///
/// Decided once from the file name when the artifact is ingested; everything
/// downstream dispatches on the variant instead of re-testing suffixes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactKind {
    /// Java archive: copied, then its manifest `Class-Path` may be rewritten
    Jar,
    /// Zip archive: expanded into the directory, never copied as itself
    Zip,
    /// Anything else: copied verbatim
    Opaque,
}

impl ArtifactKind {
    /// Classify a file name by its extension, ignoring ASCII case.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".jar") {
            Self::Jar
        } else if lower.ends_with(".zip") {
            Self::Zip
        } else {
            Self::Opaque
        }
    }

    /// Expanded artifacts leave no file of their own name in the output.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        matches!(self, Self::Zip)
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Jar => "jar",
            Self::Zip => "zip",
            Self::Opaque => "file",
        }
    }
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Jar => "Jar".red().bold(),
                Self::Zip => "Zip".blue().bold(),
                Self::Opaque => "File".white().bold(),
            }
        )
    }
}
