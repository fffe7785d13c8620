//! Shared test utilities for the docport test suite.
//!
//! Provides temp-directory workspace setup and manifest readers used by the
//! migration tests. Tests get an isolated source/target pair they can mutate
//! without affecting each other.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::MigrateConfig;
use crate::migrate::Manifest;

/// Create a temp workspace with `legacy/SUMMARY.md` holding `summary` and a
/// config pointing source and target roots into the temp dir.
///
/// The returned [`TempDir`] owns the workspace; keep it alive for the test.
pub fn setup_workspace(summary: &str) -> (TempDir, MigrateConfig) {
    let tmp = TempDir::new().unwrap();
    let source_root = tmp.path().join("legacy");
    fs::create_dir_all(&source_root).unwrap();
    fs::write(source_root.join("SUMMARY.md"), summary).unwrap();

    let config = MigrateConfig {
        source_root,
        target_root: tmp.path().join("out"),
        ..Default::default()
    };
    (tmp, config)
}

/// Write a source file under `source_root`, creating parent directories.
pub fn write_source(source_root: &Path, rel: &str, content: &str) {
    let path = source_root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Read and deserialize the `meta.json` of `dir` ("" for the target root).
pub fn read_manifest(target_root: &Path, dir: &str) -> Manifest {
    let path = if dir.is_empty() {
        target_root.join("meta.json")
    } else {
        target_root.join(dir).join("meta.json")
    };
    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e));
    serde_json::from_str(&raw).unwrap()
}
