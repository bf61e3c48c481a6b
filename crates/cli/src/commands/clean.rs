use anyhow::Result;
use clap::Args;
use kitforge_utils::remove_path;

use crate::{
    context::CommandContext,
    prompter::{InquirePrompter, Prompter},
};

#[derive(Args, Debug)]
#[command(about = "Remove the build directory")]
pub struct CleanArgs {
    /// Skip the confirmation prompt.
    #[arg(short, long, default_value = "false")]
    yes: bool,
}

/// Remove `<buildDir>` after confirmation
///
/// # Errors
/// Returns error if the user cancels the prompt or the directory cannot be removed.
pub async fn handle_clean(args: &CleanArgs) -> Result<()> {
    handle_clean_with_prompter(args, &InquirePrompter).await
}

/// # Errors
/// Returns error if the user cancels the prompt or the directory cannot be removed.
pub async fn handle_clean_with_prompter(args: &CleanArgs, prompter: &dyn Prompter) -> Result<()> {
    let context = CommandContext::new().await?;
    context.config.validate()?;
    let build_dir = context.config.build_dir(&context.root);
    if !tokio::fs::try_exists(&build_dir).await.unwrap_or(false) {
        println!("Nothing to clean");
        return Ok(());
    }
    let confirmed = args.yes
        || prompter.confirm(&format!("Remove {}?", build_dir.display()))?;
    if !confirmed {
        println!("Clean cancelled");
        return Ok(());
    }
    remove_path(&build_dir).await?;
    println!("Removed {}", build_dir.display());
    Ok(())
}
