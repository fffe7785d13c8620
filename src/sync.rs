//! Parallel-tree structure checking.
//!
//! Documentation that ships in several locales is migrated once per locale,
//! leaving sibling trees that should stay structurally identical even though
//! their text differs. This pass walks a reference tree (the source locale)
//! and verifies each file's counterpart in a translated tree: the
//! counterpart exists, has the same number of headings at the same levels,
//! and the same list items at the same indentation. Code block contents and
//! frontmatter are ignored — only structure is compared, never text.
//!
//! Counterpart paths are found by mapping each path segment through the
//! configured `[sync] path_map` (locale trees usually translate directory
//! and file names too: `menu-siswa/ujian.mdx` → `student-menu/exams.mdx`);
//! unmapped segments carry over unchanged.
//!
//! Check-only by design: mismatches are reported, never repaired. Rewriting
//! translated text in place is not something a batch tool should do
//! unattended.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::rewrite;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("cannot read reference tree {0}: {1}")]
    Root(PathBuf, #[source] std::io::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of comparing a translated tree against its reference tree.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Files whose counterpart matches structurally. Paths relative to the
    /// reference root.
    pub aligned: Vec<PathBuf>,
    pub mismatched: Vec<FileComparison>,
    pub missing: Vec<MissingCounterpart>,
}

impl SyncReport {
    /// Total reference files examined.
    pub fn checked(&self) -> usize {
        self.aligned.len() + self.mismatched.len() + self.missing.len()
    }
}

/// A reference file whose counterpart exists but differs structurally.
#[derive(Debug)]
pub struct FileComparison {
    /// Path relative to the reference root.
    pub reference: PathBuf,
    /// Counterpart path relative to the translation root.
    pub translation: PathBuf,
    /// Human-readable structural differences, document order.
    pub issues: Vec<String>,
}

/// A reference file with no counterpart in the translation tree.
#[derive(Debug)]
pub struct MissingCounterpart {
    pub reference: PathBuf,
    /// Where the counterpart was expected, relative to the translation root.
    pub expected: PathBuf,
}

/// Compare every `.mdx` file under `reference_root` against its mapped
/// counterpart under `translation_root`.
///
/// Fatal only when the reference root itself cannot be walked; individual
/// file problems land in the report.
pub fn sync_check(
    reference_root: &Path,
    translation_root: &Path,
    path_map: &BTreeMap<String, String>,
) -> Result<SyncReport, SyncError> {
    let files = collect_content_files(reference_root)
        .map_err(|e| SyncError::Root(reference_root.to_path_buf(), e))?;

    let mut report = SyncReport::default();

    for rel in files {
        let expected = map_counterpart(&rel, path_map);
        let counterpart = translation_root.join(&expected);

        if !counterpart.is_file() {
            report.missing.push(MissingCounterpart {
                reference: rel,
                expected,
            });
            continue;
        }

        let reference_body = rewrite::strip_frontmatter(&fs::read_to_string(
            reference_root.join(&rel),
        )?);
        let translation_body = rewrite::strip_frontmatter(&fs::read_to_string(&counterpart)?);

        let issues = compare(
            &analyze_structure(&reference_body),
            &analyze_structure(&translation_body),
        );
        if issues.is_empty() {
            report.aligned.push(rel);
        } else {
            report.mismatched.push(FileComparison {
                reference: rel,
                translation: expected,
                issues,
            });
        }
    }

    Ok(report)
}

/// Map a relative path into the translation tree, segment by segment.
///
/// File segments are mapped by stem so `ujian.mdx` finds an `exams` entry.
pub fn map_counterpart(rel: &Path, path_map: &BTreeMap<String, String>) -> PathBuf {
    let mut mapped = PathBuf::new();
    for component in rel.components() {
        let segment = component.as_os_str().to_string_lossy();
        let (stem, ext) = match segment.rsplit_once('.') {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (segment.as_ref(), None),
        };
        match (path_map.get(stem), ext) {
            (Some(translated), Some(ext)) => mapped.push(format!("{translated}.{ext}")),
            (Some(translated), None) => mapped.push(translated),
            (None, _) => mapped.push(segment.as_ref()),
        }
    }
    mapped
}

// ---------------------------------------------------------------------------
// Structure extraction
// ---------------------------------------------------------------------------

/// The structural skeleton of one document body.
#[derive(Debug, Default, PartialEq)]
struct Structure {
    /// Heading levels (1-6), document order.
    headings: Vec<usize>,
    /// Indent width of each list item (numbered or bulleted), document order.
    list_indents: Vec<usize>,
}

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+\S").expect("valid regex"));

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)(?:[-*+]|\d+\.)\s+\S").expect("valid regex"));

/// Extract headings and list items from a body, skipping fenced code blocks.
fn analyze_structure(body: &str) -> Structure {
    let mut structure = Structure::default();
    let mut in_code_block = false;

    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            continue;
        }
        if let Some(caps) = HEADING_RE.captures(line) {
            structure.headings.push(caps[1].len());
        } else if let Some(caps) = LIST_ITEM_RE.captures(line) {
            structure.list_indents.push(caps[1].len());
        }
    }

    structure
}

/// Describe the structural differences between two documents.
fn compare(reference: &Structure, translation: &Structure) -> Vec<String> {
    let mut issues = Vec::new();

    if reference.headings.len() != translation.headings.len() {
        issues.push(format!(
            "headings: reference {}, translation {}",
            reference.headings.len(),
            translation.headings.len()
        ));
    } else {
        for (i, (r, t)) in reference
            .headings
            .iter()
            .zip(&translation.headings)
            .enumerate()
        {
            if r != t {
                issues.push(format!("heading {}: level {} vs {}", i + 1, r, t));
            }
        }
    }

    if reference.list_indents.len() != translation.list_indents.len() {
        issues.push(format!(
            "list items: reference {}, translation {}",
            reference.list_indents.len(),
            translation.list_indents.len()
        ));
    } else {
        let drifted = reference
            .list_indents
            .iter()
            .zip(&translation.list_indents)
            .filter(|(r, t)| r != t)
            .count();
        if drifted > 0 {
            issues.push(format!("{drifted} list items differ in indentation"));
        }
    }

    issues
}

/// All `.mdx` files under `root`, as sorted relative paths.
fn collect_content_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_into(root, root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_into(dir: &Path, root: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_into(&path, root, files)?;
        } else if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("mdx")) {
            files.push(path.strip_prefix(root).expect("under root").to_path_buf());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn analyze_collects_heading_levels_in_order() {
        let s = analyze_structure("# One\n\ntext\n\n## Two\n\n### Three\n");
        assert_eq!(s.headings, vec![1, 2, 3]);
    }

    #[test]
    fn analyze_collects_list_indents() {
        let s = analyze_structure("- a\n  - b\n1. c\n   2. d\n");
        assert_eq!(s.list_indents, vec![0, 2, 0, 3]);
    }

    #[test]
    fn analyze_skips_code_block_contents() {
        let body = "# Real\n\n```md\n# Not a heading\n- not a list\n```\n\n- real item\n";
        let s = analyze_structure(body);
        assert_eq!(s.headings, vec![1]);
        assert_eq!(s.list_indents, vec![0]);
    }

    #[test]
    fn compare_identical_structures_is_clean() {
        let s = analyze_structure("# A\n\n- x\n- y\n");
        assert!(compare(&s, &s).is_empty());
    }

    #[test]
    fn compare_reports_heading_count_mismatch() {
        let r = analyze_structure("# A\n## B\n");
        let t = analyze_structure("# A\n");
        let issues = compare(&r, &t);
        assert_eq!(issues, vec!["headings: reference 2, translation 1"]);
    }

    #[test]
    fn compare_reports_heading_level_drift() {
        let r = analyze_structure("# A\n## B\n");
        let t = analyze_structure("# A\n### B\n");
        let issues = compare(&r, &t);
        assert_eq!(issues, vec!["heading 2: level 2 vs 3"]);
    }

    #[test]
    fn compare_reports_list_indent_drift() {
        let r = analyze_structure("- a\n  - b\n");
        let t = analyze_structure("- a\n    - b\n");
        let issues = compare(&r, &t);
        assert_eq!(issues, vec!["1 list items differ in indentation"]);
    }

    #[test]
    fn map_counterpart_translates_dirs_and_stems() {
        let map = BTreeMap::from([
            ("menu-siswa".to_string(), "student-menu".to_string()),
            ("ujian".to_string(), "exams".to_string()),
        ]);
        assert_eq!(
            map_counterpart(Path::new("menu-siswa/ujian.mdx"), &map),
            PathBuf::from("student-menu/exams.mdx")
        );
    }

    #[test]
    fn map_counterpart_keeps_unmapped_segments() {
        let map = BTreeMap::new();
        assert_eq!(
            map_counterpart(Path::new("guide/page.mdx"), &map),
            PathBuf::from("guide/page.mdx")
        );
    }

    #[test]
    fn sync_check_classifies_aligned_mismatched_and_missing() {
        let tmp = TempDir::new().unwrap();
        let reference = tmp.path().join("id");
        let translation = tmp.path().join("en");

        write(&reference, "intro/index.mdx", "---\ntitle: A\n---\n\n# Intro\n");
        write(&translation, "intro/index.mdx", "---\ntitle: A\n---\n\n# Intro\n");
        write(&reference, "guide/a.mdx", "# A\n## Sub\n");
        write(&translation, "guide/a.mdx", "# A\n");
        write(&reference, "guide/b.mdx", "# B\n");
        fs::create_dir_all(translation.join("guide")).unwrap();

        let report = sync_check(&reference, &translation, &BTreeMap::new()).unwrap();

        assert_eq!(report.checked(), 3);
        assert_eq!(report.aligned, vec![PathBuf::from("intro/index.mdx")]);
        assert_eq!(report.mismatched.len(), 1);
        assert_eq!(report.mismatched[0].reference, PathBuf::from("guide/a.mdx"));
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].reference, PathBuf::from("guide/b.mdx"));
    }

    #[test]
    fn sync_check_uses_path_map_for_counterparts() {
        let tmp = TempDir::new().unwrap();
        let reference = tmp.path().join("id");
        let translation = tmp.path().join("en");
        let map = BTreeMap::from([("ujian".to_string(), "exams".to_string())]);

        write(&reference, "ujian.mdx", "# Ujian\n");
        write(&translation, "exams.mdx", "# Exams\n");

        let report = sync_check(&reference, &translation, &map).unwrap();
        assert_eq!(report.aligned, vec![PathBuf::from("ujian.mdx")]);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn frontmatter_not_counted_as_structure() {
        let tmp = TempDir::new().unwrap();
        let reference = tmp.path().join("id");
        let translation = tmp.path().join("en");

        // Translation has extra frontmatter keys; body structure matches.
        write(&reference, "p.mdx", "---\ntitle: X\n---\n\n# Same\n");
        write(&translation, "p.mdx", "---\ntitle: Y\ndescription: above\n---\n\n# Same\n");

        let report = sync_check(&reference, &translation, &BTreeMap::new()).unwrap();
        assert_eq!(report.mismatched.len(), 0);
        assert_eq!(report.aligned.len(), 1);
    }

    #[test]
    fn unreadable_reference_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let result = sync_check(
            &tmp.path().join("does-not-exist"),
            tmp.path(),
            &BTreeMap::new(),
        );
        assert!(matches!(result, Err(SyncError::Root(_, _))));
    }
}
