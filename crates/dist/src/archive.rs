use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use kitforge_core::DistributionFormat;
use kitforge_utils::{to_slash_path, walk_files};
use tar::{EntryType, Header};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::{DIRECTORY_MODE, Executables};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Directory,
    File { source: PathBuf, mode: u32 },
}

/// Entries of a distribution, keyed by archive path.
///
/// Directories use a trailing slash so that every directory sorts before its
/// contents. Only directories holding at least one file are listed.
fn collect_entries(
    kit_dir: &Path,
    base_name: &str,
    executables: &Executables,
) -> Result<BTreeMap<String, Entry>> {
    let mut entries = BTreeMap::new();
    entries.insert(format!("{base_name}/"), Entry::Directory);
    let files =
        walk_files(kit_dir).with_context(|| format!("Failed to walk {}", kit_dir.display()))?;
    for file in files {
        let relative = to_slash_path(&file.relative);
        let mut parent = relative.as_str();
        while let Some((dir, _)) = parent.rsplit_once('/') {
            entries.insert(format!("{base_name}/{dir}/"), Entry::Directory);
            parent = dir;
        }
        entries.insert(
            format!("{base_name}/{relative}"),
            Entry::File {
                mode: executables.file_mode(&relative),
                source: file.path,
            },
        );
    }
    Ok(entries)
}

/// Pack `kit_dir` into `dest` under a top-level `base_name/` directory.
///
/// Entries are written in sorted order with a fixed modification time, so the
/// same kit always produces the same archive. `dest` is replaced atomically.
///
/// # Errors
/// Returns error if the kit cannot be read or the archive cannot be written.
pub fn write_distribution(
    format: DistributionFormat,
    kit_dir: &Path,
    base_name: &str,
    executables: &Executables,
    dest: &Path,
) -> Result<()> {
    let entries = collect_entries(kit_dir, base_name, executables)?;
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create {}", parent.display()))?;
    let temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create a temporary file in {}", parent.display()))?;
    let file = temp
        .as_file()
        .try_clone()
        .with_context(|| format!("Failed to open {}", temp.path().display()))?;

    match format {
        DistributionFormat::TarGz => write_tar_gz(&entries, file),
        DistributionFormat::Zip => write_zip(&entries, file),
    }
    .with_context(|| format!("Failed to write {}", dest.display()))?;

    temp.persist(dest)
        .with_context(|| format!("Failed to move distribution to {}", dest.display()))?;
    tracing::debug!("Wrote {} entries to {}", entries.len(), dest.display());
    Ok(())
}

fn write_tar_gz(entries: &BTreeMap<String, Entry>, file: File) -> io::Result<()> {
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, entry) in entries {
        let mut header = Header::new_gnu();
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);
        match entry {
            Entry::Directory => {
                header.set_entry_type(EntryType::Directory);
                header.set_mode(DIRECTORY_MODE);
                header.set_size(0);
                builder.append_data(&mut header, path, io::empty())?;
            }
            Entry::File { source, mode } => {
                let contents = File::open(source)?;
                header.set_entry_type(EntryType::Regular);
                header.set_mode(*mode);
                header.set_size(contents.metadata()?.len());
                builder.append_data(&mut header, path, contents)?;
            }
        }
    }
    let encoder = builder.into_inner()?;
    encoder.finish()?.flush()
}

fn write_zip(entries: &BTreeMap<String, Entry>, file: File) -> io::Result<()> {
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    for (path, entry) in entries {
        match entry {
            Entry::Directory => {
                writer.add_directory(path.as_str(), options.unix_permissions(DIRECTORY_MODE))?;
            }
            Entry::File { source, mode } => {
                writer.start_file(path.as_str(), options.unix_permissions(*mode))?;
                io::copy(&mut File::open(source)?, &mut writer)?;
            }
        }
    }
    writer.finish()?.flush()
}
