use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use kitforge_core::DistributionConfig;

/// Mode of kit files that match no executable pattern.
pub const DEFAULT_FILE_MODE: u32 = 0o644;
pub const DIRECTORY_MODE: u32 = 0o755;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Decides which kit files are executable, by glob on their kit-relative path.
#[derive(Debug, Clone)]
pub struct Executables {
    patterns: Vec<Pattern>,
    mode: u32,
}

impl Executables {
    /// # Errors
    /// Returns error if a pattern is not a valid glob.
    pub fn new(patterns: &[String], mode: u32) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid executable pattern {pattern:?}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns, mode })
    }

    /// # Errors
    /// Returns error if a pattern or the executable mode is invalid.
    pub fn from_config(config: &DistributionConfig) -> Result<Self> {
        Self::new(&config.executables, config.executable_mode()?)
    }

    /// The executable mode if `relative` (slash separated) matches a pattern.
    #[must_use]
    pub fn mode_for(&self, relative: &str) -> Option<u32> {
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(relative, MATCH_OPTIONS))
            .then_some(self.mode)
    }

    #[must_use]
    pub fn file_mode(&self, relative: &str) -> u32 {
        self.mode_for(relative).unwrap_or(DEFAULT_FILE_MODE)
    }
}
