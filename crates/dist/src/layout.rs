use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use kitforge_core::{AssemblyReport, Config, ResolvedSet};
use kitforge_java::assemble;
use kitforge_utils::{file_names_in, remove_path, to_slash_path, walk_files};
use thiserror::Error;
use tokio::fs::{copy, create_dir_all};

use crate::Executables;

pub const SERVER_LIB_DIR: &str = "server/lib";
pub const PLUGIN_API_DIR: &str = "server/plugins/api";
pub const PLUGIN_LIB_DIR: &str = "server/plugins/lib";
pub const TOOLS_DIR: &str = "tools";

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("{} is provided by both {} and {}", path.display(), first.display(), second.display())]
    DuplicateEntry {
        path: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("kit input {} does not exist", path.display())]
    MissingInput { path: PathBuf },
}

/// Files of the exploded kit, keyed by kit-relative destination.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KitPlan {
    entries: BTreeMap<PathBuf, PathBuf>,
    skipped: Vec<PathBuf>,
}

impl KitPlan {
    /// Add `source` at `dest`.
    ///
    /// A jar already planned at `dest` keeps its first source; any other
    /// collision is an error.
    ///
    /// # Errors
    /// Returns `DuplicateEntry` for a non-jar destination planned twice.
    pub fn insert(&mut self, dest: PathBuf, source: PathBuf) -> Result<(), LayoutError> {
        if let Some(first) = self.entries.get(&dest) {
            let is_jar = dest
                .extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case("jar"));
            if !is_jar {
                return Err(LayoutError::DuplicateEntry {
                    path: dest,
                    first: first.clone(),
                    second: source,
                });
            }
            tracing::debug!(
                "Skipping {}, {} already provided",
                source.display(),
                dest.display()
            );
            self.skipped.push(dest);
            return Ok(());
        }
        self.entries.insert(dest, source);
        Ok(())
    }

    /// Add every file under `root` below `prefix`, keeping relative paths.
    ///
    /// # Errors
    /// Returns error if `root` cannot be walked or a file collides.
    pub fn insert_tree(&mut self, prefix: &Path, root: &Path) -> Result<()> {
        let files =
            walk_files(root).with_context(|| format!("Failed to walk {}", root.display()))?;
        for file in files {
            self.insert(prefix.join(&file.relative), file.path)?;
        }
        Ok(())
    }

    /// Add library artifacts flat into `prefix`, skipping any file whose name is in `excluded`.
    ///
    /// # Errors
    /// Returns error if an input is missing or collides.
    pub fn insert_libraries(
        &mut self,
        prefix: &Path,
        paths: &[PathBuf],
        excluded: &HashSet<String>,
    ) -> Result<()> {
        for path in paths {
            let files: Vec<(PathBuf, PathBuf)> = if path.is_dir() {
                walk_files(path)
                    .with_context(|| format!("Failed to walk {}", path.display()))?
                    .into_iter()
                    .map(|file| (file.relative, file.path))
                    .collect()
            } else if path.is_file() {
                vec![(PathBuf::from(path.file_name().unwrap_or_default()), path.clone())]
            } else {
                return Err(LayoutError::MissingInput { path: path.clone() }.into());
            };
            for (relative, source) in files {
                let name = relative
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if excluded.contains(&name) {
                    tracing::debug!("{} already in the server classpath", name);
                    continue;
                }
                self.insert(prefix.join(relative), source)?;
            }
        }
        Ok(())
    }

    /// Add tools: the contents of a directory are merged into `prefix`, a file is added as is.
    ///
    /// Tools usually ship `bin/` and `lib/`, so jars shared between tools end
    /// up at the same destination and only the first copy is kept.
    ///
    /// # Errors
    /// Returns error if an input is missing or collides.
    pub fn insert_tools(&mut self, prefix: &Path, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            if path.is_dir() {
                self.insert_tree(prefix, path)?;
            } else if path.is_file() {
                let name = PathBuf::from(path.file_name().unwrap_or_default());
                self.insert(prefix.join(name), path.clone())?;
            } else {
                return Err(LayoutError::MissingInput { path: path.clone() }.into());
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries
            .iter()
            .map(|(dest, source)| (dest.as_path(), source.as_path()))
    }

    /// Jar destinations that were provided more than once.
    #[must_use]
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Plan the exploded kit from an assembled `server_libs` directory.
///
/// # Errors
/// Returns error if an input is missing or two inputs collide.
pub fn plan_kit(root: &Path, config: &Config, server_libs: &Path) -> Result<KitPlan> {
    let mut plan = KitPlan::default();
    plan.insert_tree(Path::new(SERVER_LIB_DIR), server_libs)?;

    let server_names = file_names_in(&[server_libs])?;
    let plugin_apis = Config::resolve_paths(root, &config.plugin_apis);
    plan.insert_libraries(Path::new(PLUGIN_API_DIR), &plugin_apis, &server_names)?;

    let mut provided = file_names_in(&plugin_apis)?;
    provided.extend(server_names);
    let plugin_libs = Config::resolve_paths(root, &config.plugin_libs);
    plan.insert_libraries(Path::new(PLUGIN_LIB_DIR), &plugin_libs, &provided)?;

    plan.insert_tools(Path::new(TOOLS_DIR), &Config::resolve_paths(root, &config.tools))?;
    Ok(plan)
}

/// Outcome of `explode_kit`.
#[derive(Debug, Clone)]
pub struct ExplodedKit {
    pub dir: PathBuf,
    pub assembly: AssemblyReport,
    /// Kit-relative paths of every file, sorted
    pub files: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl Display for ExplodedKit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({} files",
            "Exploded".bright_green().bold(),
            self.dir.display().to_string().bright_black(),
            self.files.len()
        )?;
        if !self.skipped.is_empty() {
            write!(f, ", {} duplicate jars skipped", self.skipped.len())?;
        }
        write!(f, ")")
    }
}

/// Assemble `serverLibs` into `<buildDir>/server-libs` and lay out `<buildDir>/exploded-kit`.
///
/// The exploded kit is recreated on every run and files matching the
/// executable patterns are made executable.
///
/// # Errors
/// Returns error if assembly fails, inputs collide or the kit cannot be written.
pub async fn explode_kit(root: &Path, config: &Config) -> Result<ExplodedKit> {
    config.validate()?;
    let executables = Executables::from_config(&config.distribution)?;
    let server_libs = config.server_libs_dir(root);
    let resolved = ResolvedSet::from_paths(Config::resolve_paths(root, &config.server_libs))?;
    let assembly = assemble(&resolved, &server_libs, config.classpath_policy).await?;

    let plan = {
        let root = root.to_path_buf();
        let config = config.clone();
        let server_libs = server_libs.clone();
        tokio::task::spawn_blocking(move || plan_kit(&root, &config, &server_libs)).await??
    };

    let dir = config.exploded_kit_dir(root);
    remove_path(&dir).await?;
    create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    tracing::info!("Writing {} files into {}", plan.len(), dir.display());

    let mut files = Vec::with_capacity(plan.len());
    for (relative, source) in plan.entries() {
        let target = dir.join(relative);
        if let Some(parent) = target.parent() {
            create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        copy(source, &target).await.with_context(|| {
            format!("Failed to copy {} to {}", source.display(), target.display())
        })?;
        if let Some(mode) = executables.mode_for(&to_slash_path(relative)) {
            set_mode(&target, mode).await?;
        }
        files.push(relative.to_path_buf());
    }

    Ok(ExplodedKit {
        dir,
        assembly,
        files,
        skipped: plan.skipped().to_vec(),
    })
}

#[cfg(unix)]
async fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .await
        .with_context(|| format!("Failed to set mode of {}", path.display()))
}

#[cfg(not(unix))]
async fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
