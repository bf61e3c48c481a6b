use std::path::{Path, PathBuf};

use gix::discover;

/// Root of the project enclosing `current_dir`.
///
/// The work tree of the enclosing git repository when there is one, otherwise
/// `current_dir` itself, so kits can also be assembled outside of a checkout.
#[must_use]
pub fn find_project_root(current_dir: &Path) -> PathBuf {
    match discover(current_dir) {
        Ok(repo) => repo
            .workdir()
            .map_or_else(|| current_dir.to_path_buf(), Path::to_path_buf),
        Err(error) => {
            tracing::debug!(
                "No git repository above {}: {error}",
                current_dir.display()
            );
            current_dir.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_project_root_in_git_repo() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path();

        std::process::Command::new("git")
            .arg("init")
            .current_dir(temp_path)
            .output()
            .unwrap();

        let nested = temp_path.join("platform-layout").join("src");
        fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested);
        assert_eq!(
            root.canonicalize().unwrap(),
            temp_path.canonicalize().unwrap()
        );

        temp_dir.close().unwrap();
    }

    #[test]
    fn test_find_project_root_without_git_repo() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path();

        let root = find_project_root(temp_path);
        // Either no repository at all, or an enclosing one far above the temp dir
        assert!(root == temp_path || temp_path.starts_with(&root));

        temp_dir.close().unwrap();
    }
}
