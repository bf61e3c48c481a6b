//! # kitforge-core
//!
//! Core types shared by every kitforge crate.
//!
//! Defines artifacts and their kinds, the ordered resolved set handed over by
//! dependency resolution, the `.kitforge/config.json` configuration, the
//! assembly error taxonomy and the `ArchiveStore` seam used to rewrite jars.

pub mod archive_store;
pub mod artifact;
pub mod artifact_kind;
pub mod assembly_report;
pub mod classpath_policy;
pub mod config;
pub mod error;
pub mod resolved_set;

pub use archive_store::ArchiveStore;
pub use artifact::Artifact;
pub use artifact_kind::ArtifactKind;
pub use assembly_report::AssemblyReport;
pub use classpath_policy::ClasspathPolicy;
pub use config::{Config, DistributionConfig, DistributionFormat};
pub use error::{AssemblyError, ManifestError};
pub use resolved_set::ResolvedSet;
