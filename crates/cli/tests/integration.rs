use flate2::read::GzDecoder;
use serial_test::serial;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn init_git_repo(path: &Path) {
    std::process::Command::new("git")
        .args(["init", "-b", "main"])
        .current_dir(path)
        .output()
        .unwrap();
}

fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn jar_manifest(path: &Path) -> String {
    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut manifest = String::new();
    archive
        .by_name("META-INF/MANIFEST.MF")
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    manifest
}

fn write_file(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Project with app.jar (declares Class-Path), lib.jar (does not) and data.zip.
fn kit_project(temp_path: &Path) {
    init_git_repo(temp_path);
    write_file(
        &temp_path.join("libs/app.jar"),
        &zip_bytes(&[
            (
                "META-INF/MANIFEST.MF",
                "Manifest-Version: 1.0\r\nClass-Path: x.jar\r\n\r\n",
            ),
            ("com/example/App.class", "app"),
        ]),
    );
    write_file(
        &temp_path.join("libs/lib.jar"),
        &zip_bytes(&[("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\r\n\r\n")]),
    );
    write_file(
        &temp_path.join("libs/data.zip"),
        &zip_bytes(&[("config/app.conf", "port=9410")]),
    );
    write_file(&temp_path.join("tool/bin/tool.sh"), b"#!/bin/sh\necho tool\n");
    write_file(
        &temp_path.join(".kitforge/config.json"),
        br#"{
  "name": "server-kit",
  "version": "1.2.3",
  "serverLibs": ["libs/app.jar", "libs/lib.jar", "libs/data.zip"],
  "tools": ["tool"]
}"#,
    );
}

async fn run(dir: &Path, args: &[&str]) -> anyhow::Result<()> {
    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir).unwrap();
    let args: Vec<String> = std::iter::once("kitforge")
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect();
    let result = kitforge_cli::main(&args).await;
    std::env::set_current_dir(&original_dir).unwrap();
    result
}

#[tokio::test]
#[serial]
async fn test_cli_init_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    init_git_repo(temp_dir.path());

    let result = run(temp_dir.path(), &["init", "--dry-run"]).await;

    assert!(result.is_ok());
    assert!(!temp_dir.path().join(".kitforge/config.json").exists());
}

#[tokio::test]
#[serial]
async fn test_cli_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    init_git_repo(temp_dir.path());

    assert!(run(temp_dir.path(), &["init"]).await.is_ok());
    let config = fs::read_to_string(temp_dir.path().join(".kitforge/config.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&config).unwrap();
    assert_eq!(value["buildDir"], "build");
    assert_eq!(value["classpathPolicy"], "excludeExpanded");

    let second = run(temp_dir.path(), &["init"]).await;
    assert!(second.unwrap_err().to_string().contains("already initialized"));
}

#[tokio::test]
#[serial]
async fn test_cli_init_from_subdirectory_uses_repo_root() {
    let temp_dir = TempDir::new().unwrap();
    init_git_repo(temp_dir.path());
    let sub = temp_dir.path().join("modules/server");
    fs::create_dir_all(&sub).unwrap();

    assert!(run(&sub, &["init"]).await.is_ok());
    assert!(temp_dir.path().join(".kitforge/config.json").exists());
    assert!(!sub.join(".kitforge").exists());
}

#[tokio::test]
#[serial]
async fn test_cli_config() {
    let temp_dir = TempDir::new().unwrap();
    kit_project(temp_dir.path());
    assert!(run(temp_dir.path(), &["config"]).await.is_ok());
}

#[tokio::test]
#[serial]
async fn test_cli_config_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    init_git_repo(temp_dir.path());
    write_file(&temp_dir.path().join(".kitforge/config.json"), b"{ not json");

    let result = run(temp_dir.path(), &["config"]).await;
    assert!(result.unwrap_err().to_string().contains("Failed to parse"));
}

#[tokio::test]
#[serial]
async fn test_cli_assemble_server_libs() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    kit_project(temp_path);

    assert!(run(temp_path, &["assemble"]).await.is_ok());

    let output = temp_path.join("build/server-libs");
    assert!(jar_manifest(&output.join("app.jar")).contains("Class-Path: lib.jar\r\n"));
    assert_eq!(
        fs::read(output.join("lib.jar")).unwrap(),
        fs::read(temp_path.join("libs/lib.jar")).unwrap()
    );
    assert_eq!(
        fs::read_to_string(output.join("config/app.conf")).unwrap(),
        "port=9410"
    );
    assert!(!output.join("data.zip").exists());
}

#[tokio::test]
#[serial]
async fn test_cli_assemble_explicit_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    kit_project(temp_path);

    let result = run(
        temp_path,
        &[
            "assemble",
            "libs/app.jar",
            "libs/lib.jar",
            "libs/data.zip",
            "-o",
            "out",
            "--include-expanded",
            "--format",
            "json",
        ],
    )
    .await;

    assert!(result.is_ok());
    assert!(
        jar_manifest(&temp_path.join("out/app.jar")).contains("Class-Path: lib.jar data.zip\r\n")
    );
}

#[tokio::test]
#[serial]
async fn test_cli_assemble_twice_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    kit_project(temp_path);

    assert!(run(temp_path, &["assemble"]).await.is_ok());
    let first = fs::read(temp_path.join("build/server-libs/app.jar")).unwrap();
    assert!(run(temp_path, &["assemble"]).await.is_ok());
    let second = fs::read(temp_path.join("build/server-libs/app.jar")).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
#[serial]
async fn test_cli_assemble_missing_artifact() {
    let temp_dir = TempDir::new().unwrap();
    kit_project(temp_dir.path());

    let result = run(temp_dir.path(), &["assemble", "libs/nope.jar"]).await;
    assert!(result.unwrap_err().to_string().contains("does not exist"));
}

#[tokio::test]
#[serial]
async fn test_cli_check() {
    let temp_dir = TempDir::new().unwrap();
    kit_project(temp_dir.path());

    assert!(run(temp_dir.path(), &["check"]).await.is_ok());
    assert!(run(temp_dir.path(), &["check", "--format", "json"]).await.is_ok());
    let missing = run(temp_dir.path(), &["check", "libs/app.jar", "libs/gone.jar"]).await;
    assert!(missing.unwrap_err().to_string().contains("1 missing"));
}

#[tokio::test]
#[serial]
async fn test_cli_explode_and_dist() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    kit_project(temp_path);

    assert!(run(temp_path, &["explode"]).await.is_ok());
    let kit = temp_path.join("build/exploded-kit");
    assert!(kit.join("server/lib/app.jar").is_file());
    assert!(kit.join("server/lib/config/app.conf").is_file());
    assert!(kit.join("tools/bin/tool.sh").is_file());

    assert!(run(temp_path, &["dist", "--format", "tar-gz"]).await.is_ok());
    let tarball = temp_path.join("build/distributions/server-kit-1.2.3.tar.gz");
    assert!(tarball.is_file());
    assert!(!temp_path.join("build/distributions/server-kit-1.2.3.zip").exists());

    let mut archive = tar::Archive::new(GzDecoder::new(fs::File::open(&tarball).unwrap()));
    let mut script_mode = None;
    for entry in archive.entries().unwrap() {
        let entry = entry.unwrap();
        if entry.path().unwrap() == Path::new("server-kit-1.2.3/tools/bin/tool.sh") {
            script_mode = Some(entry.header().mode().unwrap());
        }
    }
    assert_eq!(script_mode, Some(0o775));

    assert!(run(temp_path, &["dist"]).await.is_ok());
    assert!(temp_path.join("build/distributions/server-kit-1.2.3.zip").is_file());
}

#[tokio::test]
#[serial]
async fn test_cli_clean_yes() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    kit_project(temp_path);

    assert!(run(temp_path, &["assemble"]).await.is_ok());
    assert!(temp_path.join("build").exists());
    assert!(run(temp_path, &["clean", "--yes"]).await.is_ok());
    assert!(!temp_path.join("build").exists());
    assert!(run(temp_path, &["clean", "--yes"]).await.is_ok());
}
