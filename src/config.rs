//! Migration configuration.
//!
//! Handles loading and validating `config.toml`. Every path the pipeline
//! touches is configurable; nothing is hardcoded into the components — the
//! loaded [`MigrateConfig`] value is threaded into each call.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_root = "legacy"        # Legacy documentation tree
//! target_root = "content/docs"  # Where .mdx files and meta.json land
//! # summary = "legacy/SUMMARY.md"  # Outline document (default: <source_root>/SUMMARY.md)
//! route_root = "/docs"          # Site route prefix for rewritten links
//! source_ext = "md"             # Extension of legacy source files
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early. CLI flags override file values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Migration settings loaded from `config.toml`, with CLI flag overrides
/// applied afterwards by the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrateConfig {
    /// Root of the legacy documentation tree; outline paths resolve against it.
    pub source_root: PathBuf,
    /// Output root for generated `.mdx` files and `meta.json` manifests.
    pub target_root: PathBuf,
    /// Outline document path. Defaults to `<source_root>/SUMMARY.md`.
    pub summary: Option<PathBuf>,
    /// Site route prefix prepended to rewritten internal links.
    pub route_root: String,
    /// Extension of legacy source files (without the dot).
    pub source_ext: String,
    /// Settings for `sync-check` between parallel locale trees.
    pub sync: SyncConfig,
}

/// Configuration for the parallel-tree structure check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Maps reference-tree path segments (directory names and file stems)
    /// to their translated names, e.g. `ujian = "exams"`.
    pub path_map: BTreeMap<String, String>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("legacy"),
            target_root: PathBuf::from("content/docs"),
            summary: None,
            route_root: "/docs".to_string(),
            source_ext: "md".to_string(),
            sync: SyncConfig::default(),
        }
    }
}

impl MigrateConfig {
    /// Effective outline document path.
    pub fn summary_path(&self) -> PathBuf {
        self.summary
            .clone()
            .unwrap_or_else(|| self.source_root.join("SUMMARY.md"))
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.route_root.starts_with('/') {
            return Err(ConfigError::Validation(
                "route_root must start with '/'".into(),
            ));
        }
        if self.route_root.len() > 1 && self.route_root.ends_with('/') {
            return Err(ConfigError::Validation(
                "route_root must not end with '/'".into(),
            ));
        }
        if self.source_ext.is_empty() || self.source_ext.starts_with('.') {
            return Err(ConfigError::Validation(
                "source_ext must be a bare extension like \"md\"".into(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from `path` if it exists, falling back to defaults.
pub fn load_config(path: &Path) -> Result<MigrateConfig, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        MigrateConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A stock `config.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    r#"# docport configuration
# All options are optional - defaults shown below.

# Root of the legacy documentation tree. Paths in the outline document
# (SUMMARY.md) are resolved relative to this directory.
source_root = "legacy"

# Output root. Generated .mdx files and per-directory meta.json manifests
# are written here, mirroring the outline's hierarchy.
target_root = "content/docs"

# Outline document. Defaults to <source_root>/SUMMARY.md when omitted.
#summary = "legacy/SUMMARY.md"

# Site route prefix for rewritten internal links:
# [text](../foo/bar.md) becomes [text](/docs/foo/bar).
route_root = "/docs"

# Extension of legacy source files, without the dot.
source_ext = "md"

# Path-segment renames for sync-check, mapping reference-tree directory
# names and file stems to their translated counterparts.
#[sync.path_map]
#"menu-siswa" = "student-menu"
#ujian = "exams"
"#
    .to_string()
}
