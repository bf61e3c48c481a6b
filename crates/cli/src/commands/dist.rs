use anyhow::Result;
use clap::Args;
use colored::Colorize;
use kitforge_core::DistributionFormat;
use kitforge_dist::{build_distributions, explode_kit};

use crate::{context::CommandContext, options::DistFormatOptions};

#[derive(Args, Debug)]
#[command(about = "Build the exploded kit and pack it into distributions")]
pub struct DistArgs {
    /// Archive formats to build. Defaults to `distribution.formats` from the configuration.
    #[arg(short, long = "format", value_enum)]
    formats: Vec<DistFormatOptions>,
}

impl DistArgs {
    fn formats(&self, configured: &[DistributionFormat]) -> Vec<DistributionFormat> {
        if self.formats.is_empty() {
            configured.to_vec()
        } else {
            self.formats.iter().copied().map(Into::into).collect()
        }
    }
}

/// Explode the kit, then write one archive per format
///
/// # Errors
/// Returns error if the kit cannot be built or an archive cannot be written.
pub async fn handle_dist(args: &DistArgs) -> Result<()> {
    let context = CommandContext::new().await?;
    let kit = explode_kit(&context.root, &context.config).await?;
    println!("{kit}");

    let formats = args.formats(&context.config.distribution.formats);
    for path in build_distributions(&context.root, &context.config, &formats).await? {
        println!("{} {}", "Packed".bright_green().bold(), path.display());
    }
    Ok(())
}
