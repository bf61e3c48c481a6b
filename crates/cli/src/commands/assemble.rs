use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use kitforge_core::{ClasspathPolicy, Config, ResolvedSet};
use kitforge_java::ClasspathAssembler;

use crate::{context::CommandContext, options::FormatOptions};

#[derive(Args, Debug)]
#[command(about = "Assemble artifacts into a classpath directory")]
pub struct AssembleArgs {
    /// Artifacts in classpath order. Defaults to `serverLibs` from the configuration.
    artifacts: Vec<PathBuf>,

    /// Output directory. Defaults to `<buildDir>/server-libs`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List zip artifacts in rewritten Class-Path values too.
    #[arg(long, default_value = "false")]
    include_expanded: bool,

    #[arg(long, default_value = "stdout")]
    format: FormatOptions,
}

impl AssembleArgs {
    fn policy(&self, config: &Config) -> ClasspathPolicy {
        if self.include_expanded {
            ClasspathPolicy::IncludeAll
        } else {
            config.classpath_policy
        }
    }
}

/// Run the classpath assembler
///
/// # Errors
/// Returns error if an artifact is missing, duplicated or unreadable, or the
/// output directory cannot be written.
pub async fn handle_assemble(args: &AssembleArgs) -> Result<()> {
    let context = CommandContext::new().await?;
    let paths = if args.artifacts.is_empty() {
        Config::resolve_paths(&context.root, &context.config.server_libs)
    } else {
        args.artifacts
            .iter()
            .map(|path| context.resolve_arg(path))
            .collect()
    };
    let output = args.output.as_ref().map_or_else(
        || context.config.server_libs_dir(&context.root),
        |output| context.resolve_arg(output),
    );

    let resolved = ResolvedSet::from_paths(paths)?;
    let report = ClasspathAssembler::new()
        .with_policy(args.policy(&context.config))
        .assemble(&resolved, &output)
        .await?;
    args.format.print(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        assemble: AssembleArgs,
    }

    #[test]
    fn test_assemble_args() {
        let cli =
            TestCli::parse_from(["test", "a.jar", "b.zip", "-o", "out", "--include-expanded"]);
        assert_eq!(
            cli.assemble.artifacts,
            vec![PathBuf::from("a.jar"), PathBuf::from("b.zip")]
        );
        assert_eq!(cli.assemble.output, Some(PathBuf::from("out")));
        assert_eq!(
            cli.assemble.policy(&Config::default()),
            ClasspathPolicy::IncludeAll
        );
    }

    #[test]
    fn test_assemble_policy_from_config() {
        let cli = TestCli::parse_from(["test"]);
        assert!(cli.assemble.artifacts.is_empty());
        let config = Config {
            classpath_policy: ClasspathPolicy::IncludeAll,
            ..Default::default()
        };
        assert_eq!(cli.assemble.policy(&config), ClasspathPolicy::IncludeAll);
        assert_eq!(
            cli.assemble.policy(&Config::default()),
            ClasspathPolicy::ExcludeExpanded
        );
    }
}
