//! Per-file content rewriting.
//!
//! Stage 2 of the migration pipeline. Transforms one source file's text into
//! its `.mdx` form. Each pass is a function `&str -> String` applied in
//! sequence, so every pass is independently testable:
//!
//! 1. Strip a stale leading frontmatter block, if present.
//! 2. Root relative image targets (`assets/x.png` → `/assets/x.png`).
//! 3. Rewrite markdown links ending in the source extension onto site route
//!    paths under the configured docs route root.
//! 4. Prepend fresh frontmatter carrying the node's title.
//!
//! Absolute (`http://`/`https://`) targets always pass through unchanged, and
//! nothing outside image/link syntax is altered. Frontmatter injection runs
//! last so the rewrite passes can never touch the generated header.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::slug;

/// Transform raw source content into its final `.mdx` text.
pub fn rewrite(content: &str, title: &str, route_root: &str, source_ext: &str) -> String {
    let body = strip_frontmatter(content);
    let body = rewrite_images(&body);
    let body = rewrite_links(&body, route_root, source_ext);
    format!("---\ntitle: {}\n---\n\n{}", yaml_value(title), body)
}

// ---------------------------------------------------------------------------
// Pass 1: strip stale frontmatter
// ---------------------------------------------------------------------------

static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Opening and closing `---` fences at the very start of the file.
    Regex::new(r"\A---\r?\n(?s:.*?)\r?\n---\r?\n?").expect("valid regex")
});

/// Remove a leading `--- … ---` metadata block, if the file starts with one.
///
/// Files without a block pass through untouched, leading blank lines included.
pub fn strip_frontmatter(content: &str) -> String {
    match FRONTMATTER_RE.find(content) {
        Some(m) => content[m.end()..]
            .trim_start_matches(['\r', '\n'])
            .to_string(),
        None => content.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Pass 2: root relative image paths
// ---------------------------------------------------------------------------

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid regex"));

/// Prefix non-absolute image targets with `/`.
///
/// Source files reference assets relative to the legacy repository root; the
/// generated site serves them from its own root.
pub fn rewrite_images(content: &str) -> String {
    IMAGE_RE
        .replace_all(content, |caps: &Captures| {
            let alt = &caps[1];
            let target = caps[2].trim();
            if is_absolute_url(target) || target.starts_with('/') {
                return caps[0].to_string();
            }
            let rooted = target.trim_start_matches("./");
            format!("![{alt}](/{rooted})")
        })
        .to_string()
}

// ---------------------------------------------------------------------------
// Pass 3: rewrite markdown links onto route paths
// ---------------------------------------------------------------------------

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]]*)\]\(([^)]+)\)").expect("valid regex"));

/// Rewrite links whose target ends in the source extension onto site routes.
///
/// Leading `../` and `./` segments are discarded (the outline, not the file's
/// location, determines hierarchy), the extension is stripped, and index
/// files resolve to their directory route: `../intro/README.md` → `/docs/intro`.
pub fn rewrite_links(content: &str, route_root: &str, source_ext: &str) -> String {
    let suffix = format!(".{source_ext}");
    LINK_RE
        .replace_all(content, |caps: &Captures| {
            // Image syntax is pass 2's concern.
            if &caps[1] == "!" {
                return caps[0].to_string();
            }
            let text = &caps[2];
            let target = caps[3].trim();
            if is_absolute_url(target) || !target.ends_with(suffix.as_str()) {
                return caps[0].to_string();
            }

            let mut rest = target;
            loop {
                if let Some(stripped) = rest.strip_prefix("../") {
                    rest = stripped;
                } else if let Some(stripped) = rest.strip_prefix("./") {
                    rest = stripped;
                } else {
                    break;
                }
            }
            let rest = rest.trim_start_matches('/');

            let route = slug::normalize(&slug::derive(rest, source_ext)).to_string();
            if route.is_empty() {
                format!("[{text}]({route_root})")
            } else {
                format!("[{text}]({route_root}/{route})")
            }
        })
        .to_string()
}

fn is_absolute_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

// ---------------------------------------------------------------------------
// Pass 4: frontmatter injection
// ---------------------------------------------------------------------------

/// Quote a title for YAML only when leaving it bare would change its meaning.
fn yaml_value(title: &str) -> String {
    let needs_quoting = title.is_empty()
        || title != title.trim()
        || title.contains([':', '#', '"', '\'', '[', ']', '{', '}'])
        || title.starts_with(['-', '*', '&', '!', '|', '>', '%', '@']);
    if needs_quoting {
        format!("\"{}\"", title.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        title.to_string()
    }
}
