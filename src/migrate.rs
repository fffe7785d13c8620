//! Tree materialization and manifest generation.
//!
//! Stage 3 of the migration pipeline. Projects the parsed outline forest onto
//! the target filesystem: one `.mdx` file per node (content passed through
//! [`crate::rewrite`]) and one `meta.json` navigation manifest per produced
//! directory.
//!
//! The legacy tool computed target paths and manifest entries in two separate
//! traversals, which let the two disagree about a node's slug or index
//! status. Here a single depth-first walk does both: each node's target path
//! and its manifest entry derive from the same slug value in the same place.
//!
//! ## Output Structure
//!
//! ```text
//! content/docs/
//! ├── meta.json                  # Root navigation manifest
//! ├── intro/
//! │   └── index.mdx              # From intro/README.md
//! └── adv/
//!     ├── meta.json              # ["a", "b"]
//!     ├── a.mdx
//!     └── b.mdx
//! ```
//!
//! ## Failure Policy
//!
//! Only the run's top-level inputs are fatal: an unreadable outline document
//! or an uncreatable target root. A missing or unreadable individual source
//! file is a warning — its write is skipped, the walk continues, and the node
//! STILL appears in its directory's manifest. That last part reproduces the
//! legacy behavior deliberately; the warning text calls out the dangling
//! entry so the inconsistency is visible instead of silent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::MigrateConfig;
use crate::outline::{self, Node};
use crate::rewrite;
use crate::slug;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("cannot read outline document {0}: {1}")]
    Summary(PathBuf, #[source] std::io::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One navigation manifest, serialized to `meta.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub pages: Vec<ManifestEntry>,
}

/// A manifest entry: a bare slug segment for a leaf page, or a folder record
/// for a node with children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestEntry {
    Page(String),
    Folder(FolderEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Always `"folder"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    /// Terminal slug segments of the folder's non-index children, outline order.
    pub pages: Vec<String>,
}

/// What a run did: consumed by [`crate::output`] for the console summary.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub converted: Vec<ConvertedFile>,
    pub skipped: Vec<SkippedFile>,
    /// Manifest paths relative to the target root, e.g. `adv/meta.json`.
    pub manifests: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

#[derive(Debug)]
pub struct ConvertedFile {
    pub title: String,
    /// Source path as written in the outline.
    pub source_path: String,
    /// Target path relative to the target root, e.g. `intro/index.mdx`.
    pub target_path: PathBuf,
}

#[derive(Debug)]
pub struct SkippedFile {
    pub title: String,
    pub source_path: String,
    pub reason: String,
}

/// Run the full migration: parse the outline, materialize every node's file,
/// write one `meta.json` per produced directory.
///
/// Deterministic: repeated runs against unchanged inputs produce
/// byte-identical output trees.
pub fn migrate(config: &MigrateConfig) -> Result<MigrationReport, MigrateError> {
    let summary_path = config.summary_path();
    let text = fs::read_to_string(&summary_path)
        .map_err(|e| MigrateError::Summary(summary_path.clone(), e))?;
    let parsed = outline::parse(&text, &config.source_ext);

    fs::create_dir_all(&config.target_root)?;

    let mut report = MigrationReport {
        warnings: parsed.warnings,
        ..Default::default()
    };

    // Accumulates manifest entries keyed by directory slug ("" = target root).
    // Entry order within a directory is push order, i.e. outline order.
    let mut manifests: BTreeMap<String, Vec<ManifestEntry>> = BTreeMap::new();
    manifests.insert(String::new(), Vec::new());

    walk(&parsed.nodes, config, &mut manifests, &mut report);

    for (dir, pages) in manifests {
        let manifest_dir = join_dir(&config.target_root, &dir);
        fs::create_dir_all(&manifest_dir)?;
        let json = serde_json::to_string_pretty(&Manifest { pages })?;
        fs::write(manifest_dir.join("meta.json"), json + "\n")?;
        report.manifests.push(join_dir(Path::new(""), &dir).join("meta.json"));
    }

    Ok(report)
}

/// Resolve the outline against the source tree without writing anything.
///
/// Backs the `check` subcommand: the returned report lists what a migration
/// run *would* convert and which source files are missing.
pub fn verify(config: &MigrateConfig) -> Result<MigrationReport, MigrateError> {
    let summary_path = config.summary_path();
    let text = fs::read_to_string(&summary_path)
        .map_err(|e| MigrateError::Summary(summary_path.clone(), e))?;
    let parsed = outline::parse(&text, &config.source_ext);

    let mut report = MigrationReport {
        warnings: parsed.warnings,
        ..Default::default()
    };

    outline::for_each(&parsed.nodes, &mut |node| {
        if config.source_root.join(&node.source_path).is_file() {
            report.converted.push(ConvertedFile {
                title: node.title.clone(),
                source_path: node.source_path.clone(),
                target_path: target_rel_path(node),
            });
        } else {
            report
                .warnings
                .push(missing_source_warning(&node.source_path));
            report.skipped.push(SkippedFile {
                title: node.title.clone(),
                source_path: node.source_path.clone(),
                reason: "source file not found".to_string(),
            });
        }
    });

    Ok(report)
}

fn walk(
    nodes: &[Node],
    config: &MigrateConfig,
    manifests: &mut BTreeMap<String, Vec<ManifestEntry>>,
    report: &mut MigrationReport,
) {
    for node in nodes {
        materialize(node, config, report);

        let normalized = slug::normalize(&node.slug);
        let dir = slug::parent_dir(normalized);

        if node.children.is_empty() {
            // A node whose normalized slug is empty is the root index page;
            // index pages are never self-listed.
            if let Some(segment) = slug::terminal_segment(normalized) {
                manifests
                    .entry(dir.to_string())
                    .or_default()
                    .push(ManifestEntry::Page(segment.to_string()));
            }
        } else {
            let pages = node
                .children
                .iter()
                .filter(|child| !slug::is_index(&child.slug))
                .filter_map(|child| slug::terminal_segment(slug::normalize(&child.slug)))
                .map(str::to_string)
                .collect();
            manifests
                .entry(dir.to_string())
                .or_default()
                .push(ManifestEntry::Folder(FolderEntry {
                    kind: "folder".to_string(),
                    title: node.title.clone(),
                    pages,
                }));
            walk(&node.children, config, manifests, report);
        }
    }
}

/// Write one node's `.mdx` file. Per-file failures never unwind past the
/// current node: they become a warning plus a skip entry in the report.
fn materialize(node: &Node, config: &MigrateConfig, report: &mut MigrationReport) {
    let target_rel = target_rel_path(node);
    let target = config.target_root.join(&target_rel);
    let source = config.source_root.join(&node.source_path);

    if !source.is_file() {
        report
            .warnings
            .push(missing_source_warning(&node.source_path));
        report.skipped.push(SkippedFile {
            title: node.title.clone(),
            source_path: node.source_path.clone(),
            reason: "source file not found".to_string(),
        });
        return;
    }

    let written = (|| -> std::io::Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = fs::read_to_string(&source)?;
        let rewritten =
            rewrite::rewrite(&content, &node.title, &config.route_root, &config.source_ext);
        fs::write(&target, rewritten)
    })();

    match written {
        Ok(()) => report.converted.push(ConvertedFile {
            title: node.title.clone(),
            source_path: node.source_path.clone(),
            target_path: target_rel,
        }),
        Err(e) => {
            report
                .warnings
                .push(format!("failed to convert {}: {}", node.source_path, e));
            report.skipped.push(SkippedFile {
                title: node.title.clone(),
                source_path: node.source_path.clone(),
                reason: e.to_string(),
            });
        }
    }
}

fn target_rel_path(node: &Node) -> PathBuf {
    let mut segments: Vec<&str> = node.slug.split('/').filter(|s| !s.is_empty()).collect();
    let last = segments.pop();
    let mut path = PathBuf::new();
    for segment in segments {
        path.push(segment);
    }
    if let Some(last) = last {
        // Appended, not set_extension: a stem like `v1.2-notes` must keep its dot.
        path.push(format!("{last}.mdx"));
    }
    path
}

fn join_dir(root: &Path, dir: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in dir.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}

fn missing_source_warning(source_path: &str) -> String {
    format!("missing source: {source_path} (entry remains listed in its manifest)")
}
