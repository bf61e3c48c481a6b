use std::io::{Cursor, Read, Write};
use std::path::Path;

use kitforge_core::AssemblyError;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::manifest::{CLASS_PATH, MANIFEST_PATH, Manifest};

type JarArchive<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Read the manifest of an in-memory jar, if it has one.
///
/// # Errors
/// Returns `ArchiveOpen` if `jar` is not a zip archive and `ManifestParse` if
/// the manifest is malformed.
pub fn read_manifest(path: &Path, jar: &[u8]) -> Result<Option<Manifest>, AssemblyError> {
    let mut archive = open(path, jar)?;
    Ok(load_manifest(path, &mut archive)?.map(|(_, manifest)| manifest))
}

/// Rebuild `jar` with its `Class-Path` set to `classpath`.
///
/// Returns `None` when the jar has no manifest or its manifest declares no
/// `Class-Path`; such jars must be left as they are. Every entry except the
/// manifest is copied without recompression, and the manifest is stored with a
/// fixed timestamp so rebuilding the same input gives the same bytes.
///
/// # Errors
/// Returns `ArchiveOpen` if `jar` is not a readable archive and
/// `ManifestParse` if its manifest is malformed.
pub fn rewrite_classpath(
    path: &Path,
    jar: &[u8],
    classpath: &str,
) -> Result<Option<Vec<u8>>, AssemblyError> {
    let mut archive = open(path, jar)?;
    let Some((manifest_index, mut manifest)) = load_manifest(path, &mut archive)? else {
        return Ok(None);
    };
    if !manifest.main_attributes().contains(CLASS_PATH) {
        return Ok(None);
    }
    manifest.main_attributes_mut().set(CLASS_PATH, classpath);

    let archive_error = |error: ZipError| AssemblyError::archive(path, error);
    let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(jar.len())));
    for index in 0..archive.len() {
        if index == manifest_index {
            let name = archive
                .by_index_raw(index)
                .map_err(archive_error)?
                .name()
                .to_string();
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(DateTime::default());
            writer.start_file(name, options).map_err(archive_error)?;
            writer
                .write_all(&manifest.to_bytes())
                .map_err(|error| archive_error(ZipError::Io(error)))?;
        } else {
            let entry = archive.by_index_raw(index).map_err(archive_error)?;
            writer.raw_copy_file(entry).map_err(archive_error)?;
        }
    }
    let cursor = writer.finish().map_err(archive_error)?;
    Ok(Some(cursor.into_inner()))
}

fn open<'a>(path: &Path, jar: &'a [u8]) -> Result<JarArchive<'a>, AssemblyError> {
    ZipArchive::new(Cursor::new(jar)).map_err(|error| AssemblyError::archive(path, error))
}

fn load_manifest(
    path: &Path,
    archive: &mut JarArchive<'_>,
) -> Result<Option<(usize, Manifest)>, AssemblyError> {
    let Some(index) = (0..archive.len()).find(|index| {
        archive
            .name_for_index(*index)
            .is_some_and(|name| name.eq_ignore_ascii_case(MANIFEST_PATH))
    }) else {
        return Ok(None);
    };

    let mut entry = archive
        .by_index(index)
        .map_err(|error| AssemblyError::archive(path, error))?;
    let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
    entry
        .read_to_end(&mut bytes)
        .map_err(|error| AssemblyError::archive(path, ZipError::Io(error)))?;
    let manifest = Manifest::parse(&bytes).map_err(|reason| AssemblyError::manifest(path, reason))?;
    Ok(Some((index, manifest)))
}
