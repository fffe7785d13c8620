//! Centralized slug derivation for outline entries.
//!
//! Every route decision in the pipeline (target file paths, manifest entry
//! segments, rewritten link targets) goes through this module so the two
//! consumers can never disagree about a page's position in the hierarchy.
//!
//! ## Slug Shape
//!
//! A slug is a `/`-separated route path relative to the target root, with the
//! source extension stripped and index-style file names canonicalized:
//! - `intro/README.md` → `intro/index`
//! - `adv/a.md` → `adv/a`
//! - `guide/getting-started.md` → `guide/getting-started`
//!
//! The *normalized* form of a slug drops a trailing `index` segment, because
//! an index page is addressed by its directory: `intro/index` normalizes to
//! `intro`, and a root-level `index` normalizes to the empty string.

/// Canonical terminal segment for a directory's index page.
pub const INDEX_TOKEN: &str = "index";

/// File stems treated as a directory's index page.
const INDEX_STEMS: &[&str] = &["README", "index"];

/// Derive a slug from a source path relative to the source root.
///
/// Strips a leading `./`, strips `ext` from the final segment (case-insensitive),
/// and canonicalizes index stems to [`INDEX_TOKEN`]:
/// - `derive("intro/README.md", "md")` → `"intro/index"`
/// - `derive("adv/a.md", "md")` → `"adv/a"`
/// - `derive("chapterA/index-source.md", "md")` → `"chapterA/index-source"`
///
/// Derivation is deterministic: the same input always yields the same slug.
pub fn derive(source_path: &str, ext: &str) -> String {
    let trimmed = source_path.trim_start_matches("./").replace('\\', "/");
    let mut segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    let stem = match segments.pop() {
        Some(last) => strip_extension(last, ext),
        None => return String::new(),
    };

    let terminal = if is_index_stem(stem) { INDEX_TOKEN } else { stem };

    let mut slug = segments.join("/");
    if !slug.is_empty() {
        slug.push('/');
    }
    slug.push_str(terminal);
    slug
}

/// Drop a trailing `index` segment: `intro/index` → `intro`, `index` → `""`.
pub fn normalize(slug: &str) -> &str {
    if slug == INDEX_TOKEN {
        ""
    } else if let Some(parent) = slug.strip_suffix(&format!("/{INDEX_TOKEN}")) {
        parent
    } else {
        slug
    }
}

/// Whether a slug addresses an index page.
pub fn is_index(slug: &str) -> bool {
    slug == INDEX_TOKEN || slug.ends_with(&format!("/{INDEX_TOKEN}"))
}

/// The last segment of a slug: `adv/a` → `a`. Empty slugs have none.
pub fn terminal_segment(slug: &str) -> Option<&str> {
    slug.rsplit('/').next().filter(|s| !s.is_empty())
}

/// The directory portion of a slug: `adv/a` → `adv`, `intro` → `""`.
pub fn parent_dir(slug: &str) -> &str {
    slug.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn strip_extension<'a>(segment: &'a str, ext: &str) -> &'a str {
    match segment.rsplit_once('.') {
        Some((stem, e)) if e.eq_ignore_ascii_case(ext) => stem,
        _ => segment,
    }
}

fn is_index_stem(stem: &str) -> bool {
    INDEX_STEMS.iter().any(|s| stem.eq_ignore_ascii_case(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readme_becomes_index() {
        assert_eq!(derive("intro/README.md", "md"), "intro/index");
    }

    #[test]
    fn lowercase_readme_becomes_index() {
        assert_eq!(derive("intro/readme.md", "md"), "intro/index");
    }

    #[test]
    fn index_stem_kept_as_index() {
        assert_eq!(derive("guide/index.md", "md"), "guide/index");
    }

    #[test]
    fn plain_file_keeps_stem() {
        assert_eq!(derive("adv/a.md", "md"), "adv/a");
    }

    #[test]
    fn index_like_stem_is_not_index() {
        assert_eq!(derive("chapterA/index-source.md", "md"), "chapterA/index-source");
    }

    #[test]
    fn derivation_is_idempotent() {
        let first = derive("chapterA/index-source.md", "md");
        let second = derive("chapterA/index-source.md", "md");
        assert_eq!(first, second);
    }

    #[test]
    fn leading_dot_slash_stripped() {
        assert_eq!(derive("./intro/README.md", "md"), "intro/index");
    }

    #[test]
    fn top_level_readme() {
        assert_eq!(derive("README.md", "md"), "index");
    }

    #[test]
    fn unknown_extension_kept() {
        assert_eq!(derive("notes/raw.txt", "md"), "notes/raw.txt");
    }

    #[test]
    fn extension_case_insensitive() {
        assert_eq!(derive("a/B.MD", "md"), "a/B");
    }

    #[test]
    fn normalize_drops_trailing_index() {
        assert_eq!(normalize("intro/index"), "intro");
    }

    #[test]
    fn normalize_root_index_is_empty() {
        assert_eq!(normalize("index"), "");
    }

    #[test]
    fn normalize_leaves_plain_slug() {
        assert_eq!(normalize("adv/a"), "adv/a");
    }

    #[test]
    fn index_detection() {
        assert!(is_index("index"));
        assert!(is_index("intro/index"));
        assert!(!is_index("adv/a"));
        assert!(!is_index("chapterA/index-source"));
    }

    #[test]
    fn terminal_segment_of_nested_slug() {
        assert_eq!(terminal_segment("adv/a"), Some("a"));
        assert_eq!(terminal_segment("intro"), Some("intro"));
        assert_eq!(terminal_segment(""), None);
    }

    #[test]
    fn parent_dir_of_slugs() {
        assert_eq!(parent_dir("adv/a"), "adv");
        assert_eq!(parent_dir("intro"), "");
        assert_eq!(parent_dir("deep/nested/page"), "deep/nested");
    }
}
