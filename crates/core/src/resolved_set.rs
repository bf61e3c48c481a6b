use std::collections::HashMap;
use std::path::PathBuf;

use crate::{Artifact, ArtifactKind, AssemblyError, ClasspathPolicy};

/// Ordered artifacts handed over by dependency resolution.
///
/// Order matters twice: it is the order of rewritten `Class-Path` values and
/// the last-writer-wins order when zip contents overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSet {
    artifacts: Vec<Artifact>,
}

impl ResolvedSet {
    #[must_use]
    pub const fn new(artifacts: Vec<Artifact>) -> Self {
        Self { artifacts }
    }

    /// # Errors
    /// Returns error if any path has no file name.
    pub fn from_paths<I, P>(paths: I) -> Result<Self, AssemblyError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .map(Artifact::from_path)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn of_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &Artifact> {
        self.artifacts
            .iter()
            .filter(move |artifact| artifact.kind() == kind)
    }

    /// File names resolved more than once, each reported once in first-seen order.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut counts = HashMap::<&str, usize>::new();
        for artifact in &self.artifacts {
            *counts.entry(artifact.file_name()).or_default() += 1;
        }
        let mut duplicates = Vec::new();
        for artifact in &self.artifacts {
            let name = artifact.file_name();
            if counts.get(name).is_some_and(|count| *count > 1) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// # Errors
    /// Returns `DuplicateArtifact` for the first file name resolved twice.
    pub fn ensure_unique(&self) -> Result<(), AssemblyError> {
        match self.duplicate_names().first() {
            Some(name) => Err(AssemblyError::DuplicateArtifact {
                file_name: (*name).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Space-joined names of every artifact other than `file_name`, in resolved order.
    #[must_use]
    pub fn classpath_for(&self, file_name: &str, policy: ClasspathPolicy) -> String {
        self.artifacts
            .iter()
            .filter(|artifact| artifact.file_name() != file_name)
            .filter(|artifact| policy.admits(artifact.kind()))
            .map(Artifact::file_name)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<Artifact> for ResolvedSet {
    fn from_iter<T: IntoIterator<Item = Artifact>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ResolvedSet {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set(names: &[&str]) -> ResolvedSet {
        names
            .iter()
            .map(|name| Artifact::new(*name, format!("/resolved/{name}")))
            .collect()
    }

    #[rstest]
    #[case(&["a.jar", "b.jar", "c.jar"], "a.jar", "b.jar c.jar")]
    #[case(&["a.jar", "b.jar", "c.jar"], "b.jar", "a.jar c.jar")]
    #[case(&["a.jar", "b.jar", "c.jar"], "c.jar", "a.jar b.jar")]
    #[case(&["only.jar"], "only.jar", "")]
    #[case(&["app.jar", "lib.jar", "data.zip"], "app.jar", "lib.jar")]
    #[case(&["app.jar", "notes.txt", "lib.jar"], "app.jar", "notes.txt lib.jar")]
    fn test_classpath_for_excludes_self_and_expanded(
        #[case] names: &[&str],
        #[case] target: &str,
        #[case] expected: &str,
    ) {
        let resolved = set(names);
        assert_eq!(
            resolved.classpath_for(target, ClasspathPolicy::ExcludeExpanded),
            expected
        );
    }

    #[test]
    fn test_classpath_for_include_all_keeps_zips() {
        let resolved = set(&["app.jar", "lib.jar", "data.zip"]);
        assert_eq!(
            resolved.classpath_for("app.jar", ClasspathPolicy::IncludeAll),
            "lib.jar data.zip"
        );
    }

    #[test]
    fn test_duplicate_names_reported_once() {
        let resolved = set(&["a.jar", "b.jar", "a.jar", "c.zip", "a.jar", "c.zip"]);
        assert_eq!(resolved.duplicate_names(), vec!["a.jar", "c.zip"]);
        assert!(matches!(
            resolved.ensure_unique(),
            Err(AssemblyError::DuplicateArtifact { file_name }) if file_name == "a.jar"
        ));
    }

    #[test]
    fn test_unique_set_passes() {
        let resolved = set(&["a.jar", "A.jar"]);
        assert!(resolved.duplicate_names().is_empty());
        assert!(resolved.ensure_unique().is_ok());
    }

    #[test]
    fn test_of_kind_preserves_order() {
        let resolved = set(&["z.jar", "data.zip", "a.jar", "more.zip"]);
        let jars: Vec<_> = resolved
            .of_kind(ArtifactKind::Jar)
            .map(Artifact::file_name)
            .collect();
        assert_eq!(jars, vec!["z.jar", "a.jar"]);
        let zips: Vec<_> = resolved
            .of_kind(ArtifactKind::Zip)
            .map(Artifact::file_name)
            .collect();
        assert_eq!(zips, vec!["data.zip", "more.zip"]);
    }

    #[test]
    fn test_from_paths() {
        let resolved = ResolvedSet::from_paths(["/a/x.jar", "/b/y.zip"]).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved.artifacts()[1].file_name(), "y.zip");
        assert!(!resolved.is_empty());
    }
}
