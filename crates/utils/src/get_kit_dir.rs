use std::path::{Path, PathBuf};

use crate::find_project_root;

pub const KIT_DIR_NAME: &str = ".kitforge";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// `.kitforge` directory at the project root
#[must_use]
pub fn get_kit_dir(current_dir: &Path) -> PathBuf {
    find_project_root(current_dir).join(KIT_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_get_kit_dir_at_git_root() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path();

        std::process::Command::new("git")
            .arg("init")
            .current_dir(temp_path)
            .output()
            .unwrap();

        let nested_dir = temp_path.join("src").join("subdir");
        fs::create_dir_all(&nested_dir).unwrap();

        let kit_dir = get_kit_dir(&nested_dir);
        assert!(kit_dir.ends_with(KIT_DIR_NAME));
        assert_eq!(
            kit_dir.parent().unwrap().canonicalize().unwrap(),
            temp_path.canonicalize().unwrap()
        );

        temp_dir.close().unwrap();
    }
}
