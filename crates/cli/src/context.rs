use anyhow::Result;
use kitforge_core::Config;
use kitforge_utils::{find_project_root, get_kit_config};
use std::path::{Path, PathBuf};

/// Project root and effective configuration shared by commands.
#[derive(Debug)]
pub struct CommandContext {
    pub current_dir: PathBuf,
    pub root: PathBuf,
    pub config: Config,
}

impl CommandContext {
    /// # Errors
    /// Returns error if the current directory is unavailable or the configuration is invalid.
    pub async fn new() -> Result<Self> {
        Self::from_dir(&std::env::current_dir()?).await
    }

    /// # Errors
    /// Returns error if the configuration exists but is invalid.
    pub async fn from_dir(current_dir: &Path) -> Result<Self> {
        let root = find_project_root(current_dir);
        let config = get_kit_config(current_dir).await?;
        tracing::debug!("Project root {}", root.display());
        Ok(Self {
            current_dir: current_dir.to_path_buf(),
            root,
            config,
        })
    }

    /// Paths given on the command line are relative to the current directory.
    #[must_use]
    pub fn resolve_arg(&self, path: &Path) -> PathBuf {
        self.current_dir.join(path)
    }
}
