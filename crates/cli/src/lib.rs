use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::commands::{
    AssembleArgs, CheckArgs, CleanArgs, ConfigArgs, DistArgs, ExplodeArgs, InitArgs,
    handle_assemble, handle_check, handle_clean, handle_config, handle_dist, handle_explode,
    handle_init,
};
pub mod commands;
pub mod context;
pub mod options;
pub mod prompter;

pub use prompter::UserCancelled;

/// Environment variable holding the log filter, e.g. `KITFORGE_LOG=kitforge_java=debug`.
pub const LOG_ENV: &str = "KITFORGE_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "kitforge",
    author,
    version,
    about = "Assemble Java server kits: classpath directories, exploded layouts and distributions",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Init(InitArgs),
    Config(ConfigArgs),
    Assemble(AssembleArgs),
    Check(CheckArgs),
    Explode(ExplodeArgs),
    Dist(DistArgs),
    Clean(CleanArgs),
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    // a subscriber may already be installed when called more than once in-process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

pub async fn main(args: &[String]) -> Result<()> {
    let cli = Cli::parse_from(args);
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Init(args) => handle_init(&args).await?,
        Commands::Config(args) => handle_config(&args).await?,
        Commands::Assemble(args) => handle_assemble(&args).await?,
        Commands::Check(args) => handle_check(&args).await?,
        Commands::Explode(args) => handle_explode(&args).await?,
        Commands::Dist(args) => handle_dist(&args).await?,
        Commands::Clean(args) => handle_clean(&args).await?,
    }
    Ok(())
}
