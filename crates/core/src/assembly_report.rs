use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;

use colored::Colorize;

/// What a classpath assembly did to its output directory.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyReport {
    pub output_dir: PathBuf,
    /// Artifacts mirrored into the directory under their own name
    pub copied: Vec<String>,
    /// Jars whose `Class-Path` was rewritten
    pub patched: Vec<String>,
    /// Jars left byte-identical to their source
    pub untouched: Vec<String>,
    /// Zip artifacts whose contents were expanded
    pub expanded: Vec<String>,
    /// Stale top-level entries removed by the mirror step
    pub removed: Vec<String>,
}

impl Display for AssemblyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} {}",
            "Assembled".bright_green().bold(),
            self.output_dir.display().to_string().bright_black()
        )?;
        writeln!(f, "  copied:    {}", self.copied.len())?;
        writeln!(f, "  patched:   {}", self.patched.len())?;
        writeln!(f, "  untouched: {}", self.untouched.len())?;
        writeln!(f, "  expanded:  {}", self.expanded.len())?;
        write!(f, "  removed:   {}", self.removed.len())
    }
}
