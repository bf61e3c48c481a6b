use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::manifest::MANIFEST_PATH;

/// Build a jar with an optional manifest followed by `entries`.
pub fn jar_bytes(manifest: Option<&str>, entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    if let Some(manifest) = manifest {
        writer.start_file(MANIFEST_PATH, options).unwrap();
        writer.write_all(manifest.as_bytes()).unwrap();
    }
    for (name, contents) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn jar_entry(jar: &[u8], name: &str) -> Option<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(jar)).unwrap();
    let mut entry = archive.by_name(name).ok()?;
    let mut contents = Vec::new();
    entry.read_to_end(&mut contents).unwrap();
    Some(contents)
}

pub fn jar_names(jar: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(jar)).unwrap();
    (0..archive.len())
        .filter_map(|index| archive.name_for_index(index).map(str::to_string))
        .collect()
}
