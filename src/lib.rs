//! # docport
//!
//! A one-shot migration tool for legacy documentation trees. It reads a
//! GitBook-style outline document (`SUMMARY.md`), rebuilds the equivalent
//! hierarchy of `.mdx` content files under a target root, rewrites each
//! file's internal references, and emits one `meta.json` navigation manifest
//! per produced directory.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Parse       SUMMARY.md  →  Node forest     (outline text → structured data)
//! 2. Rewrite     per file    →  .mdx text       (frontmatter + link/image paths)
//! 3. Materialize forest      →  target tree     (.mdx files + meta.json manifests)
//! ```
//!
//! The forest is built once and read-only afterwards. Stage 3 is a single
//! depth-first traversal that decides each node's target path AND its
//! manifest entry from the same slug value — the legacy tool computed these
//! in two independent passes, which could disagree about a node's slug or
//! index status.
//!
//! Execution is fully synchronous and single-threaded: the corpus is small
//! and processed once, so all I/O is blocking and sequential. Repeated runs
//! against unchanged inputs produce byte-identical output trees.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`outline`] | Stage 1 — parses the bullet-list outline into an ordered forest of nodes |
//! | [`rewrite`] | Stage 2 — per-file text transform: frontmatter, image paths, link targets |
//! | [`migrate`] | Stage 3 — unified materialization + manifest generation over the forest |
//! | [`slug`] | Route-path derivation shared by every path decision in the pipeline |
//! | [`config`] | `config.toml` loading, validation, and the stock-config printer |
//! | [`sync`] | Post-migration check that parallel locale trees stayed structurally aligned |
//! | [`output`] | CLI output formatting — tree and report display of pipeline results |
//!
//! # Failure Policy
//!
//! Only top-level inputs are fatal (unreadable outline document, uncreatable
//! target root). Everything per-file — a missing or unreadable source — is a
//! warning in the run report; the traversal continues and the process still
//! exits 0. See [`migrate`] for the one deliberate legacy quirk this
//! preserves: skipped files remain listed in their directory's manifest.

pub mod config;
pub mod migrate;
pub mod outline;
pub mod output;
pub mod rewrite;
pub mod slug;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_helpers;
