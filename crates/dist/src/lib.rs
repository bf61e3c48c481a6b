//! # kitforge-dist
//!
//! Kit layout and distribution archives.
//!
//! Lays out the exploded server kit (`server/lib`, `server/plugins/api`,
//! `server/plugins/lib`, `tools`) from the assembled server libraries, and packs
//! it into reproducible tar.gz and zip distributions.

pub mod archive;
pub mod executables;
pub mod layout;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kitforge_core::{Config, DistributionFormat};

pub use archive::write_distribution;
pub use executables::{DEFAULT_FILE_MODE, DIRECTORY_MODE, Executables};
pub use layout::{ExplodedKit, KitPlan, LayoutError, explode_kit, plan_kit};

/// Pack the exploded kit into `<buildDir>/distributions/<name>-<version>.<ext>`, once per format.
///
/// Returns the written archive paths in `formats` order.
///
/// # Errors
/// Returns error if the kit has not been exploded yet or an archive cannot be written.
pub async fn build_distributions(
    root: &Path,
    config: &Config,
    formats: &[DistributionFormat],
) -> Result<Vec<PathBuf>> {
    let kit_dir = config.exploded_kit_dir(root);
    if !tokio::fs::try_exists(&kit_dir).await.unwrap_or(false) {
        anyhow::bail!(
            "Exploded kit not found at {}, run `kitforge explode` first",
            kit_dir.display()
        );
    }
    let executables = Executables::from_config(&config.distribution)?;
    let base_name = config.distribution_base_name();
    let dist_dir = config.distributions_dir(root);

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let dest = dist_dir.join(format!("{base_name}.{}", format.extension()));
        tracing::info!("Packing {}", dest.display());
        let format = *format;
        let kit_dir = kit_dir.clone();
        let base_name = base_name.clone();
        let executables = executables.clone();
        let target = dest.clone();
        tokio::task::spawn_blocking(move || {
            write_distribution(format, &kit_dir, &base_name, &executables, &target)
        })
        .await
        .context("Distribution task failed")??;
        written.push(dest);
    }
    Ok(written)
}
