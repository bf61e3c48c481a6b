//! # kitforge-java
//!
//! Jar handling for kitforge.
//!
//! Reads and writes `META-INF/MANIFEST.MF`, rewrites the `Class-Path` of jars
//! without recompressing their entries, and assembles a resolved set of
//! artifacts into a directory where every jar references its siblings.

pub mod classpath_assembly;
pub mod jar;
pub mod manifest;

#[cfg(test)]
mod test_support;

pub use classpath_assembly::{ClasspathAssembler, PatchOutcome, assemble};
pub use jar::{read_manifest, rewrite_classpath};
pub use manifest::{Attributes, CLASS_PATH, MANIFEST_PATH, MANIFEST_VERSION, Manifest, Section};
