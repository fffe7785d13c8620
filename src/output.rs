//! CLI output formatting for all pipeline stages.
//!
//! Output is information-centric, not file-centric: the primary display for
//! every entry is its semantic identity — positional index and title — with
//! filesystem paths shown as secondary context (`Source:` lines, `→` target
//! arrows).
//!
//! ## Output Format
//!
//! ### Outline
//!
//! ```text
//! Outline
//! 001 Getting Started
//!     Source: intro/README.md
//! 002 Advanced
//!     Source: adv/README.md
//!     001 Memory
//!         Source: adv/a.md
//! ```
//!
//! ### Migrate
//!
//! ```text
//! Converted
//! 001 Getting Started → intro/index.mdx
//! 002 Advanced → adv/index.mdx
//!
//! Manifests
//!     meta.json
//!     adv/meta.json
//!
//! Warnings
//!     missing source: adv/b.md (entry remains listed in its manifest)
//!
//! Converted 2 files, skipped 1, wrote 2 manifests, 1 warning
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::migrate::MigrationReport;
use crate::outline::Node;
use crate::sync::SyncReport;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Outline display
// ============================================================================

/// Format the parsed outline forest as an indented tree.
pub fn format_outline_output(nodes: &[Node]) -> Vec<String> {
    let mut lines = vec!["Outline".to_string()];
    format_outline_level(nodes, 0, &mut lines);
    if nodes.is_empty() {
        lines.push("    (no entries)".to_string());
    }
    lines
}

fn format_outline_level(nodes: &[Node], depth: usize, lines: &mut Vec<String>) {
    for (i, node) in nodes.iter().enumerate() {
        let base = indent(depth);
        lines.push(format!("{}{} {}", base, format_index(i + 1), node.title));
        lines.push(format!("{}    Source: {}", base, node.source_path));
        format_outline_level(&node.children, depth + 1, lines);
    }
}

/// Print outline output to stdout.
pub fn print_outline_output(nodes: &[Node]) {
    for line in format_outline_output(nodes) {
        println!("{}", line);
    }
}

// ============================================================================
// Migration report display
// ============================================================================

/// Format a migration (or check) report: converted files, manifests,
/// warnings, and a final status line.
///
/// `dry_run` switches the wording for the `check` subcommand, which resolves
/// the outline without writing.
pub fn format_migrate_output(report: &MigrationReport, dry_run: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let header = if dry_run { "Would convert" } else { "Converted" };
    lines.push(header.to_string());
    for (i, file) in report.converted.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            file.title,
            file.target_path.display()
        ));
        lines.push(format!("    Source: {}", file.source_path));
    }
    if report.converted.is_empty() {
        lines.push("    (nothing)".to_string());
    }

    if !report.manifests.is_empty() {
        lines.push(String::new());
        lines.push("Manifests".to_string());
        for manifest in &report.manifests {
            lines.push(format!("    {}", manifest.display()));
        }
    }

    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &report.warnings {
            lines.push(format!("    {}", warning));
        }
    }

    lines.push(String::new());
    lines.push(summary_line(report, dry_run));
    lines
}

fn summary_line(report: &MigrationReport, dry_run: bool) -> String {
    let verb = if dry_run { "Would convert" } else { "Converted" };
    let mut parts = vec![format!("{} {} files", verb, report.converted.len())];
    if !report.skipped.is_empty() {
        parts.push(format!("skipped {}", report.skipped.len()));
    }
    if !dry_run {
        parts.push(format!("wrote {} manifests", report.manifests.len()));
    }
    if !report.warnings.is_empty() {
        let n = report.warnings.len();
        parts.push(format!("{} warning{}", n, if n == 1 { "" } else { "s" }));
    }
    parts.join(", ")
}

/// Print migration output to stdout.
pub fn print_migrate_output(report: &MigrationReport, dry_run: bool) {
    for line in format_migrate_output(report, dry_run) {
        println!("{}", line);
    }
}

// ============================================================================
// Sync check report display
// ============================================================================

/// Format a parallel-tree check report: mismatched files with their
/// structural differences, missing counterparts, and a final status line.
///
/// Aligned files are counted but not listed individually; the interesting
/// output is what drifted.
pub fn format_sync_output(report: &SyncReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.mismatched.is_empty() {
        lines.push("Mismatched".to_string());
        for (i, file) in report.mismatched.iter().enumerate() {
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(i + 1),
                file.reference.display(),
                file.translation.display()
            ));
            for issue in &file.issues {
                lines.push(format!("    {}", issue));
            }
        }
        lines.push(String::new());
    }

    if !report.missing.is_empty() {
        lines.push("Missing counterparts".to_string());
        for file in &report.missing {
            lines.push(format!(
                "    {} (expected {})",
                file.reference.display(),
                file.expected.display()
            ));
        }
        lines.push(String::new());
    }

    lines.push(sync_summary_line(report));
    lines
}

fn sync_summary_line(report: &SyncReport) -> String {
    let mut parts = vec![format!(
        "Checked {} files: {} aligned",
        report.checked(),
        report.aligned.len()
    )];
    if !report.mismatched.is_empty() {
        parts.push(format!("{} mismatched", report.mismatched.len()));
    }
    if !report.missing.is_empty() {
        parts.push(format!("{} missing", report.missing.len()));
    }
    parts.join(", ")
}

/// Print sync check output to stdout.
pub fn print_sync_output(report: &SyncReport) {
    for line in format_sync_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::{ConvertedFile, SkippedFile};
    use crate::outline;
    use crate::sync::{FileComparison, MissingCounterpart};
    use std::path::PathBuf;

    fn sample_report() -> MigrationReport {
        MigrationReport {
            converted: vec![
                ConvertedFile {
                    title: "Getting Started".to_string(),
                    source_path: "intro/README.md".to_string(),
                    target_path: PathBuf::from("intro/index.mdx"),
                },
                ConvertedFile {
                    title: "Memory".to_string(),
                    source_path: "adv/a.md".to_string(),
                    target_path: PathBuf::from("adv/a.mdx"),
                },
            ],
            skipped: vec![SkippedFile {
                title: "Profiling".to_string(),
                source_path: "adv/b.md".to_string(),
                reason: "source file not found".to_string(),
            }],
            manifests: vec![PathBuf::from("meta.json"), PathBuf::from("adv/meta.json")],
            warnings: vec!["missing source: adv/b.md".to_string()],
        }
    }

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn outline_output_shows_tree_with_sources() {
        let parsed = outline::parse(
            "- [A](a.md)\n  - [B](nested/b.md)\n",
            "md",
        );
        let lines = format_outline_output(&parsed.nodes);
        assert_eq!(lines[0], "Outline");
        assert_eq!(lines[1], "001 A");
        assert_eq!(lines[2], "    Source: a.md");
        assert_eq!(lines[3], "    001 B");
        assert_eq!(lines[4], "        Source: nested/b.md");
    }

    #[test]
    fn outline_output_empty_forest() {
        let lines = format_outline_output(&[]);
        assert_eq!(lines, vec!["Outline", "    (no entries)"]);
    }

    #[test]
    fn migrate_output_lists_conversions_and_manifests() {
        let lines = format_migrate_output(&sample_report(), false);
        assert_eq!(lines[0], "Converted");
        assert_eq!(lines[1], "001 Getting Started \u{2192} intro/index.mdx");
        assert_eq!(lines[2], "    Source: intro/README.md");
        assert!(lines.contains(&"Manifests".to_string()));
        assert!(lines.contains(&"    adv/meta.json".to_string()));
        assert!(lines.contains(&"Warnings".to_string()));
    }

    #[test]
    fn migrate_summary_line_counts_everything() {
        let lines = format_migrate_output(&sample_report(), false);
        assert_eq!(
            lines.last().unwrap(),
            "Converted 2 files, skipped 1, wrote 2 manifests, 1 warning"
        );
    }

    #[test]
    fn check_output_uses_conditional_wording() {
        let lines = format_migrate_output(&sample_report(), true);
        assert_eq!(lines[0], "Would convert");
        assert!(lines.last().unwrap().starts_with("Would convert 2 files"));
        assert!(!lines.last().unwrap().contains("manifests"));
    }

    #[test]
    fn sync_output_lists_drift_and_counts_rest() {
        let report = SyncReport {
            aligned: vec![PathBuf::from("intro/index.mdx")],
            mismatched: vec![FileComparison {
                reference: PathBuf::from("guide/a.mdx"),
                translation: PathBuf::from("guide/a.mdx"),
                issues: vec!["headings: reference 2, translation 1".to_string()],
            }],
            missing: vec![MissingCounterpart {
                reference: PathBuf::from("guide/b.mdx"),
                expected: PathBuf::from("guide/b.mdx"),
            }],
        };

        let lines = format_sync_output(&report);
        assert_eq!(lines[0], "Mismatched");
        assert_eq!(lines[1], "001 guide/a.mdx \u{2192} guide/a.mdx");
        assert_eq!(lines[2], "    headings: reference 2, translation 1");
        assert!(lines.contains(&"Missing counterparts".to_string()));
        assert!(lines.contains(&"    guide/b.mdx (expected guide/b.mdx)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Checked 3 files: 1 aligned, 1 mismatched, 1 missing"
        );
    }

    #[test]
    fn sync_output_clean_report_is_one_line() {
        let report = SyncReport {
            aligned: vec![PathBuf::from("a.mdx"), PathBuf::from("b.mdx")],
            ..Default::default()
        };
        let lines = format_sync_output(&report);
        assert_eq!(lines, vec!["Checked 2 files: 2 aligned"]);
    }

    #[test]
    fn empty_report_shows_placeholder() {
        let report = MigrationReport::default();
        let lines = format_migrate_output(&report, false);
        assert!(lines.contains(&"    (nothing)".to_string()));
        assert_eq!(lines.last().unwrap(), "Converted 0 files, wrote 0 manifests");
    }
}
