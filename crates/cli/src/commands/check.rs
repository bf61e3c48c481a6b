use std::fmt::Display;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use kitforge_core::{Artifact, ArtifactKind, Config, ResolvedSet};
use kitforge_java::read_manifest;
use serde::Serialize;

use crate::{context::CommandContext, options::FormatOptions};

#[derive(Args, Debug)]
#[command(about = "Check resolved artifacts before assembly")]
pub struct CheckArgs {
    /// Artifacts in classpath order. Defaults to `serverLibs` from the configuration.
    artifacts: Vec<PathBuf>,

    #[arg(long, default_value = "stdout")]
    format: FormatOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactStatus {
    pub file_name: String,
    pub path: PathBuf,
    pub kind: ArtifactKind,
    pub exists: bool,
    /// Entries of the manifest `Class-Path`, for jars that declare one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_path: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub artifacts: Vec<ArtifactStatus>,
    pub duplicates: Vec<String>,
}

impl CheckReport {
    fn missing(&self) -> usize {
        self.artifacts.iter().filter(|status| !status.exists).count()
    }

    fn is_ok(&self) -> bool {
        self.missing() == 0 && self.duplicates.is_empty()
    }
}

impl Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Found {} artifacts", self.artifacts.len())?;
        for status in &self.artifacts {
            write!(f, "\n{}", display_status(status))?;
        }
        for name in &self.duplicates {
            write!(f, "\n{} {name}", "duplicate".red().bold())?;
        }
        Ok(())
    }
}

async fn inspect(artifact: &Artifact) -> ArtifactStatus {
    let metadata = tokio::fs::metadata(artifact.path()).await.ok();
    let mut status = ArtifactStatus {
        file_name: artifact.file_name().to_string(),
        path: artifact.path().to_path_buf(),
        kind: artifact.kind(),
        exists: metadata.is_some(),
        class_path: None,
        error: None,
    };
    let is_file = metadata.is_some_and(|metadata| metadata.is_file());
    if artifact.kind() != ArtifactKind::Jar || !is_file {
        return status;
    }
    let manifest = match tokio::fs::read(artifact.path()).await {
        Ok(bytes) => read_manifest(artifact.path(), &bytes).map_err(|error| error.to_string()),
        Err(error) => Err(error.to_string()),
    };
    match manifest {
        Ok(manifest) => {
            status.class_path = manifest.and_then(|manifest| {
                manifest
                    .class_path_entries()
                    .map(|entries| entries.into_iter().map(str::to_string).collect())
            });
        }
        Err(error) => status.error = Some(error),
    }
    status
}

/// Inspect every artifact of `resolved`.
pub async fn check_artifacts(resolved: &ResolvedSet) -> CheckReport {
    let mut artifacts = Vec::with_capacity(resolved.len());
    for artifact in resolved {
        artifacts.push(inspect(artifact).await);
    }
    CheckReport {
        artifacts,
        duplicates: resolved
            .duplicate_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

fn display_status(status: &ArtifactStatus) -> String {
    let state = if !status.exists {
        "missing".red().bold().to_string()
    } else if let Some(error) = &status.error {
        format!("{} {error}", "invalid".yellow().bold())
    } else if let Some(class_path) = &status.class_path {
        format!("Class-Path: {}", class_path.join(" ").bright_black())
    } else {
        "ok".green().to_string()
    };
    format!(
        "{} {} {}",
        format!("[{}]", status.kind).bright_blue().bold(),
        status.file_name.bright_white().bold(),
        state
    )
}

/// Report kind, presence and `Class-Path` of each artifact
///
/// # Errors
/// Returns error if an artifact is missing or a file name is resolved twice.
pub async fn handle_check(args: &CheckArgs) -> Result<()> {
    let context = CommandContext::new().await?;
    let paths = if args.artifacts.is_empty() {
        Config::resolve_paths(&context.root, &context.config.server_libs)
    } else {
        args.artifacts
            .iter()
            .map(|path| context.resolve_arg(path))
            .collect()
    };
    let resolved = ResolvedSet::from_paths(paths)?;
    let report = check_artifacts(&resolved).await;

    args.format.print(&report)?;

    if !report.is_ok() {
        anyhow::bail!(
            "{} missing and {} duplicated artifacts",
            report.missing(),
            report.duplicates.len()
        );
    }
    Ok(())
}
