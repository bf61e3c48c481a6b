use serde::{Deserialize, Serialize};

use crate::ArtifactKind;

/// Which sibling artifacts are listed in a rewritten `Class-Path`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ClasspathPolicy {
    /// Leave out zip artifacts: only their contents reach the output directory,
    /// so their own file name would be a dangling classpath entry.
    #[default]
    ExcludeExpanded,
    /// List every other artifact, zips included.
    IncludeAll,
}

impl ClasspathPolicy {
    #[must_use]
    pub const fn admits(&self, kind: ArtifactKind) -> bool {
        match self {
            Self::ExcludeExpanded => !kind.is_expanded(),
            Self::IncludeAll => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ClasspathPolicy::ExcludeExpanded, ArtifactKind::Jar, true)]
    #[case(ClasspathPolicy::ExcludeExpanded, ArtifactKind::Opaque, true)]
    #[case(ClasspathPolicy::ExcludeExpanded, ArtifactKind::Zip, false)]
    #[case(ClasspathPolicy::IncludeAll, ArtifactKind::Zip, true)]
    #[case(ClasspathPolicy::IncludeAll, ArtifactKind::Jar, true)]
    fn test_policy_admits(
        #[case] policy: ClasspathPolicy,
        #[case] kind: ArtifactKind,
        #[case] expected: bool,
    ) {
        assert_eq!(policy.admits(kind), expected);
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&ClasspathPolicy::ExcludeExpanded).unwrap();
        assert_eq!(json, "\"excludeExpanded\"");
        let policy: ClasspathPolicy = serde_json::from_str("\"includeAll\"").unwrap();
        assert_eq!(policy, ClasspathPolicy::IncludeAll);
    }
}
