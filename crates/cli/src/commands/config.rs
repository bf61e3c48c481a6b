use anyhow::Result;
use clap::Args;

use crate::context::CommandContext;

#[derive(Args, Debug)]
#[command(about = "Show the effective kitforge configuration")]
pub struct ConfigArgs {}

/// Print the configuration, defaults included, as JSON
///
/// # Errors
/// Returns error if reading the configuration fails.
pub async fn handle_config(_args: &ConfigArgs) -> Result<()> {
    let context = CommandContext::new().await?;
    println!("{}", serde_json::to_string_pretty(&context.config)?);
    Ok(())
}
