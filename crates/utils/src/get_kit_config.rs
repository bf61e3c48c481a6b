use std::path::Path;

use anyhow::{Context, Result};
use kitforge_core::Config;
use tokio::fs::{metadata, read_to_string};

use crate::{CONFIG_FILE_NAME, get_kit_dir};

/// Load `.kitforge/config.json`, falling back to defaults when it is absent.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed, or if it
/// points `buildDir` outside the project.
pub async fn get_kit_config(current_dir: &Path) -> Result<Config> {
    let config_file = get_kit_dir(current_dir).join(CONFIG_FILE_NAME);
    let is_file = metadata(&config_file)
        .await
        .is_ok_and(|metadata| metadata.is_file());
    if !is_file {
        tracing::debug!("No {} found, using defaults", config_file.display());
        return Ok(Config::default());
    }
    let content = read_to_string(&config_file)
        .await
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", config_file.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", config_file.display()))?;
    Ok(config)
}
