use std::io;
use std::path::Path;
use std::sync::Arc;

use futures::{StreamExt, stream};
use kitforge_core::{
    ArchiveStore, Artifact, ArtifactKind, AssemblyError, AssemblyReport, ClasspathPolicy,
    ResolvedSet,
};
use kitforge_utils::{FsArchiveStore, expand_zip, sync_files};

use crate::jar::rewrite_classpath;

/// What patching did to a single jar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// `Class-Path` was replaced
    Patched,
    /// No manifest, or no `Class-Path`; the jar was not written
    Untouched,
}

/// Materializes a resolved set into a directory usable as a runtime classpath.
#[derive(Debug, Clone)]
pub struct ClasspathAssembler<S: ArchiveStore = FsArchiveStore> {
    store: Arc<S>,
    policy: ClasspathPolicy,
    parallelism: usize,
}

impl Default for ClasspathAssembler<FsArchiveStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl ClasspathAssembler<FsArchiveStore> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(FsArchiveStore)
    }
}

impl<S: ArchiveStore> ClasspathAssembler<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store: Arc::new(store),
            policy: ClasspathPolicy::default(),
            parallelism: num_cpus::get().max(1),
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: ClasspathPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Maximum number of jars patched at the same time.
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    #[must_use]
    pub const fn policy(&self) -> ClasspathPolicy {
        self.policy
    }

    /// Assemble `resolved` into `output_dir`.
    ///
    /// Jars and other files are mirrored into the directory, every jar whose
    /// manifest declares `Class-Path` gets it replaced by the names of its
    /// siblings, and zips are expanded in resolved order. Running it twice on
    /// the same input leaves byte-identical contents.
    ///
    /// # Errors
    /// `DuplicateArtifact` and `MissingArtifact` are reported before the output
    /// directory is touched. Any other error aborts the run.
    pub async fn assemble(
        &self,
        resolved: &ResolvedSet,
        output_dir: &Path,
    ) -> Result<AssemblyReport, AssemblyError> {
        resolved.ensure_unique()?;
        for artifact in resolved {
            if !tokio::fs::try_exists(artifact.path())
                .await
                .map_err(|error| AssemblyError::io(artifact.path(), error))?
            {
                return Err(AssemblyError::MissingArtifact {
                    path: artifact.path().to_path_buf(),
                });
            }
        }

        tracing::info!(
            "Assembling {} artifacts into {}",
            resolved.len(),
            output_dir.display()
        );
        let mirrored: Vec<(&str, &Path)> = resolved
            .iter()
            .filter(|artifact| !artifact.kind().is_expanded())
            .map(|artifact| (artifact.file_name(), artifact.path()))
            .collect();
        let synced = sync_files(&mirrored, output_dir).await?;

        let mut report = AssemblyReport {
            output_dir: output_dir.to_path_buf(),
            copied: synced.copied,
            removed: synced.removed,
            ..Default::default()
        };

        let mut jars = Vec::new();
        for artifact in resolved.of_kind(ArtifactKind::Jar) {
            if is_regular_file(artifact.path()).await? {
                jars.push(artifact);
            } else {
                tracing::debug!(
                    "{} is not a regular file, not patching",
                    artifact.path().display()
                );
                report.untouched.push(artifact.file_name().to_string());
            }
        }
        tracing::info!("Patching {} jars", jars.len());
        let outcomes = stream::iter(jars)
            .map(|artifact| self.patch_artifact(resolved, artifact, output_dir))
            .buffered(self.parallelism)
            .collect::<Vec<_>>()
            .await;
        for outcome in outcomes {
            let (name, outcome) = outcome?;
            match outcome {
                PatchOutcome::Patched => report.patched.push(name),
                PatchOutcome::Untouched => report.untouched.push(name),
            }
        }

        for artifact in resolved.of_kind(ArtifactKind::Zip) {
            if !is_regular_file(artifact.path()).await? {
                tracing::debug!(
                    "{} is not a regular file, not expanding",
                    artifact.path().display()
                );
                continue;
            }
            let extracted = expand_zip(artifact.path(), output_dir).await?;
            tracing::info!(
                "Expanded {} files from {}",
                extracted.len(),
                artifact.file_name()
            );
            report.expanded.push(artifact.file_name().to_string());
        }
        Ok(report)
    }

    async fn patch_artifact(
        &self,
        resolved: &ResolvedSet,
        artifact: &Artifact,
        output_dir: &Path,
    ) -> Result<(String, PatchOutcome), AssemblyError> {
        let classpath = resolved.classpath_for(artifact.file_name(), self.policy);
        let outcome = self
            .patch_jar(&output_dir.join(artifact.file_name()), classpath)
            .await?;
        Ok((artifact.file_name().to_string(), outcome))
    }

    /// Replace the `Class-Path` of the jar stored at `jar_path`, if it declares one.
    ///
    /// # Errors
    /// Returns `ArchiveOpen`, `ManifestParse` or an error from the store.
    pub async fn patch_jar(
        &self,
        jar_path: &Path,
        classpath: String,
    ) -> Result<PatchOutcome, AssemblyError> {
        let bytes = self.store.read(jar_path).await?;
        let path = jar_path.to_path_buf();
        let rewritten = tokio::task::spawn_blocking(move || {
            rewrite_classpath(&path, &bytes, &classpath)
        })
        .await
        .map_err(|error| AssemblyError::io(jar_path, io::Error::other(error)))??;

        match rewritten {
            Some(contents) => {
                self.store.replace(jar_path, contents).await?;
                tracing::debug!("Patched Class-Path of {}", jar_path.display());
                Ok(PatchOutcome::Patched)
            }
            None => Ok(PatchOutcome::Untouched),
        }
    }
}

async fn is_regular_file(path: &Path) -> Result<bool, AssemblyError> {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .map_err(|error| AssemblyError::io(path, error))
}

/// Assemble `resolved` into `output_dir` on the local filesystem.
///
/// # Errors
/// See [`ClasspathAssembler::assemble`].
pub async fn assemble(
    resolved: &ResolvedSet,
    output_dir: &Path,
    policy: ClasspathPolicy,
) -> Result<AssemblyReport, AssemblyError> {
    ClasspathAssembler::new()
        .with_policy(policy)
        .assemble(resolved, output_dir)
        .await
}
