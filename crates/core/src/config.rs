use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::ClasspathPolicy;

/// Loaded from `.kitforge/config.json`, describes the inputs of a kit and how it is packaged.
///
/// Artifact paths are resolved relative to the project root. Every field has a default,
/// so an empty `{}` file is a valid configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Distribution base name (e.g. "terracotta-platform-layout")
    #[serde(default = "default_name")]
    pub name: String,

    /// Version appended to distribution archive names
    #[serde(default = "default_version")]
    pub version: String,

    /// Directory receiving server-libs, the exploded kit and distributions
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Resolved server runtime artifacts, assembled into `server/lib`
    #[serde(default)]
    pub server_libs: Vec<PathBuf>,

    /// Plugin API artifacts, copied into `server/plugins/api`
    #[serde(default)]
    pub plugin_apis: Vec<PathBuf>,

    /// Plugin implementation artifacts, copied into `server/plugins/lib`
    #[serde(default)]
    pub plugin_libs: Vec<PathBuf>,

    /// Tool directories or files, copied into `tools`
    #[serde(default)]
    pub tools: Vec<PathBuf>,

    /// Whether zip artifacts are listed in rewritten `Class-Path` values
    #[serde(default)]
    pub classpath_policy: ClasspathPolicy,

    #[serde(default)]
    pub distribution: DistributionConfig,
}

/// Archive formats a kit can be distributed as.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DistributionFormat {
    TarGz,
    Zip,
}

impl DistributionFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionConfig {
    #[serde(default = "default_formats")]
    pub formats: Vec<DistributionFormat>,

    /// Glob patterns (relative to the kit root) of files that must be executable
    #[serde(default = "default_executables")]
    pub executables: Vec<String>,

    /// Octal permission bits for executable files
    #[serde(default = "default_executable_mode")]
    pub executable_mode: String,
}

fn default_name() -> String {
    "kit".to_string()
}

fn default_version() -> String {
    "0.0.0".to_string()
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_formats() -> Vec<DistributionFormat> {
    vec![DistributionFormat::TarGz, DistributionFormat::Zip]
}

fn default_executables() -> Vec<String> {
    vec!["**/*.sh".to_string(), "**/*.bat".to_string()]
}

fn default_executable_mode() -> String {
    "0775".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            build_dir: default_build_dir(),
            server_libs: Vec::new(),
            plugin_apis: Vec::new(),
            plugin_libs: Vec::new(),
            tools: Vec::new(),
            classpath_policy: ClasspathPolicy::default(),
            distribution: DistributionConfig::default(),
        }
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            executables: default_executables(),
            executable_mode: default_executable_mode(),
        }
    }
}

impl Config {
    /// Reject configurations whose outputs would land outside the project.
    ///
    /// `buildDir` is removed and recreated by `clean` and `explode`, so it must
    /// name a directory strictly below the project root.
    ///
    /// # Errors
    /// Returns error if `buildDir` is empty, absolute, contains `..` or is the root itself.
    pub fn validate(&self) -> Result<()> {
        let mut below_root = false;
        for component in self.build_dir.components() {
            match component {
                Component::Normal(_) => below_root = true,
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    anyhow::bail!(
                        "buildDir {:?} must be a relative path inside the project",
                        self.build_dir
                    );
                }
            }
        }
        if !below_root {
            anyhow::bail!(
                "buildDir {:?} must name a directory below the project root",
                self.build_dir
            );
        }
        Ok(())
    }

    /// `<root>/<buildDir>`.
    #[must_use]
    pub fn build_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.build_dir)
    }

    #[must_use]
    pub fn server_libs_dir(&self, root: &Path) -> PathBuf {
        self.build_dir(root).join("server-libs")
    }

    #[must_use]
    pub fn exploded_kit_dir(&self, root: &Path) -> PathBuf {
        self.build_dir(root).join("exploded-kit")
    }

    #[must_use]
    pub fn distributions_dir(&self, root: &Path) -> PathBuf {
        self.build_dir(root).join("distributions")
    }

    /// `<name>-<version>`, the top directory inside distribution archives.
    #[must_use]
    pub fn distribution_base_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    #[must_use]
    pub fn resolve_paths(root: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths.iter().map(|path| root.join(path)).collect()
    }
}

impl DistributionConfig {
    /// # Errors
    /// Returns error if `executableMode` is not an octal number below `0o7777`.
    pub fn executable_mode(&self) -> Result<u32> {
        let digits = self.executable_mode.trim_start_matches("0o");
        let mode = u32::from_str_radix(digits, 8)
            .with_context(|| format!("Invalid executable mode {:?}", self.executable_mode))?;
        if mode > 0o7777 {
            anyhow::bail!("Executable mode {:?} is out of range", self.executable_mode);
        }
        Ok(mode)
    }
}
