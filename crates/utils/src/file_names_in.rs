use std::collections::HashSet;
use std::io;
use std::path::Path;

use crate::walk_files;

/// File names (last component only) of every regular file in `paths`.
///
/// Directories contribute the names of all files beneath them. Used to keep a
/// library out of a kit directory when another directory already ships it.
///
/// # Errors
/// Returns error if a directory cannot be walked.
pub fn file_names_in<P: AsRef<Path>>(paths: &[P]) -> io::Result<HashSet<String>> {
    let mut names = HashSet::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            for file in walk_files(path)? {
                if let Some(name) = file.path.file_name() {
                    names.insert(name.to_string_lossy().into_owned());
                }
            }
        } else if let Some(name) = path.file_name() {
            names.insert(name.to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_names_in_flattens_directories() {
        let temp_dir = TempDir::new().unwrap();
        let libs = temp_dir.path().join("server-libs");
        fs::create_dir_all(libs.join("config")).unwrap();
        fs::write(libs.join("runtime.jar"), "r").unwrap();
        fs::write(libs.join("config/app.conf"), "c").unwrap();

        let names = file_names_in(&[libs, temp_dir.path().join("api.jar")]).unwrap();
        assert_eq!(names.len(), 3);
        assert!(names.contains("runtime.jar"));
        assert!(names.contains("app.conf"));
        assert!(names.contains("api.jar"));
    }
}
