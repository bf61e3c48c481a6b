use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use kitforge_core::AssemblyError;
use zip::ZipArchive;
use zip::result::ZipError;

/// Extract every entry of the zip at `archive` into `dest`.
///
/// Existing files are overwritten, so when several archives are expanded into
/// the same directory the last one wins. Entries whose names would escape
/// `dest` are skipped. Returns the relative paths of the extracted files.
///
/// # Errors
/// Returns `ArchiveOpen` if the file is not a readable zip, `Io` if the
/// destination cannot be written.
pub async fn expand_zip(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>, AssemblyError> {
    let archive_path = archive.to_path_buf();
    let dest_path = dest.to_path_buf();
    tokio::task::spawn_blocking(move || expand_zip_blocking(&archive_path, &dest_path))
        .await
        .map_err(|error| AssemblyError::io(archive, io::Error::other(error)))?
}

fn expand_zip_blocking(archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>, AssemblyError> {
    let file = File::open(archive_path).map_err(|error| AssemblyError::io(archive_path, error))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|error| AssemblyError::archive(archive_path, error))?;
    tracing::debug!(
        "Expanding {} entries of {} into {}",
        archive.len(),
        archive_path.display(),
        dest.display()
    );

    let mut extracted = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|error| AssemblyError::archive(archive_path, error))?;
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!(
                "Skipping unsafe entry {} in {}",
                entry.name(),
                archive_path.display()
            );
            continue;
        };
        let relative = relative.to_path_buf();
        let target = dest.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|error| AssemblyError::io(&target, error))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|error| AssemblyError::io(parent, error))?;
        }
        clear_target(&target)?;

        let mut out = File::create(&target).map_err(|error| AssemblyError::io(&target, error))?;
        io::copy(&mut entry, &mut out).map_err(|error| match error.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                AssemblyError::archive(archive_path, ZipError::Io(error))
            }
            _ => AssemblyError::io(&target, error),
        })?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777))
                .map_err(|error| AssemblyError::io(&target, error))?;
        }
        extracted.push(relative);
    }
    Ok(extracted)
}

fn clear_target(target: &Path) -> Result<(), AssemblyError> {
    match fs::symlink_metadata(target) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(target),
        Ok(_) => fs::remove_file(target),
        Err(_) => Ok(()),
    }
    .map_err(|error| AssemblyError::io(target, error))
}
