use tokio::fs::{create_dir_all, write};

use anyhow::Result;
use clap::Args;
use kitforge_core::Config;
use kitforge_utils::{CONFIG_FILE_NAME, get_kit_dir};

#[derive(Args, Debug)]
#[command(about = "Initialize a new kitforge project")]
pub struct InitArgs {
    /// If true, do not make any filesystem changes.
    #[arg(short, long, default_value = "false")]
    dry_run: bool,
}

/// Write `.kitforge/config.json` with the default configuration
///
/// # Errors
/// Returns error if the project is already initialized or the file cannot be written.
pub async fn handle_init(args: &InitArgs) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let kit_dir = get_kit_dir(&current_dir);
    let config_file = kit_dir.join(CONFIG_FILE_NAME);
    if tokio::fs::try_exists(&config_file).await? {
        anyhow::bail!("kitforge project already initialized");
    }
    if !args.dry_run {
        create_dir_all(&kit_dir).await?;
        write(
            &config_file,
            serde_json::to_string_pretty(&Config::default())?,
        )
        .await?;
    }
    println!("kitforge project initialized in {}", kit_dir.display());
    Ok(())
}
