use anyhow::Result;
use clap::Args;
use kitforge_dist::explode_kit;

use crate::context::CommandContext;

#[derive(Args, Debug)]
#[command(about = "Lay out the exploded server kit")]
pub struct ExplodeArgs {}

/// Assemble server libraries and write `<buildDir>/exploded-kit`
///
/// # Errors
/// Returns error if assembly fails or kit inputs collide.
pub async fn handle_explode(_args: &ExplodeArgs) -> Result<()> {
    let context = CommandContext::new().await?;
    let kit = explode_kit(&context.root, &context.config).await?;
    println!("{}", kit.assembly);
    println!("{kit}");
    Ok(())
}
