//! Outline document parsing.
//!
//! Stage 1 of the migration pipeline. Parses the legacy table-of-contents
//! document (GitBook's `SUMMARY.md` convention): a nested bullet list where
//! each line maps a display title to a source file:
//!
//! ```text
//! - [Getting Started](intro/README.md)
//! - [Advanced](adv/README.md)
//!   - [Memory Layout](adv/a.md)
//!   - [Profiling](adv/b.md)
//! ```
//!
//! Indentation (2 spaces per level) encodes nesting. The parser makes one
//! linear pass with an explicit ancestor stack and returns an immutable
//! forest of [`Node`]s whose shape mirrors the outline exactly, preserving
//! source order — that order later drives both file materialization and
//! navigation manifests.
//!
//! Lines that don't match the bullet pattern (blank lines, prose, headings)
//! are skipped, as the legacy tool did. Unlike the legacy tool, a line that
//! *starts* like a bullet but lacks a `[title](path)` link is reported as a
//! warning, as are odd indent widths and nesting jumps — the parser repairs
//! both rather than silently misplacing nodes.

use std::sync::LazyLock;

use regex::Regex;

use crate::slug;

/// Spaces per nesting level in the outline document.
const INDENT_UNIT: usize = 2;

/// One entry of the outline forest.
///
/// Built once by [`parse`] and read-only afterwards: both materialization and
/// manifest generation walk the same immutable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Display title from the bullet's link text.
    pub title: String,
    /// Source file path relative to the source root, as written in the outline.
    pub source_path: String,
    /// Route path derived from `source_path` (see [`crate::slug`]).
    pub slug: String,
    /// Depth in the forest; always exactly parent level + 1.
    pub level: usize,
    /// Ordered children, outline order.
    pub children: Vec<Node>,
}

/// Parse result: the forest plus any warnings collected along the way.
#[derive(Debug, Default)]
pub struct Outline {
    /// Root-level nodes in source order. An outline need not have a single root.
    pub nodes: Vec<Node>,
    pub warnings: Vec<String>,
}

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)[-*+][ \t]+\[([^\]]*)\]\(([^)]+)\)").expect("valid regex")
});

static PARTIAL_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*[-*+][ \t]+\S").expect("valid regex"));

/// Parse the full text of an outline document into a forest.
///
/// Pure function: reading the document from disk is the caller's concern.
/// `source_ext` is the extension stripped during slug derivation.
pub fn parse(text: &str, source_ext: &str) -> Outline {
    let mut outline = Outline::default();
    // Open ancestor chain; nodes fold into their parent (or the root list)
    // once a sibling or shallower entry closes their subtree.
    let mut stack: Vec<Node> = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let Some(caps) = BULLET_RE.captures(line) else {
            if PARTIAL_BULLET_RE.is_match(line) {
                outline.warnings.push(format!(
                    "line {}: bullet without [title](path) link, skipped: {}",
                    lineno + 1,
                    line.trim()
                ));
            }
            continue;
        };

        let indent = caps[1].len();
        let title = caps[2].trim().to_string();
        let source_path = caps[3].trim().to_string();

        let mut level = indent / INDENT_UNIT;
        if indent % INDENT_UNIT != 0 {
            outline.warnings.push(format!(
                "line {}: indent of {} spaces is not a multiple of {}, treating as level {}",
                lineno + 1,
                indent,
                INDENT_UNIT,
                level
            ));
        }

        // Close finished subtrees.
        while stack.len() > level {
            let finished = stack.pop().expect("stack checked non-empty");
            attach(finished, &mut stack, &mut outline.nodes);
        }

        // A child can only be one level deeper than its parent; repair jumps.
        if level > stack.len() {
            outline.warnings.push(format!(
                "line {}: nesting jumps from level {} to {}, treating as level {}",
                lineno + 1,
                stack.len().saturating_sub(1),
                level,
                stack.len()
            ));
            level = stack.len();
        }

        stack.push(Node {
            title,
            slug: slug::derive(&source_path, source_ext),
            source_path,
            level,
            children: Vec::new(),
        });
    }

    while let Some(finished) = stack.pop() {
        attach(finished, &mut stack, &mut outline.nodes);
    }

    outline
}

fn attach(node: Node, stack: &mut Vec<Node>, roots: &mut Vec<Node>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Visit every node of the forest depth-first, in outline order.
pub fn for_each<'a>(nodes: &'a [Node], f: &mut impl FnMut(&'a Node)) {
    for node in nodes {
        f(node);
        for_each(&node.children, f);
    }
}
