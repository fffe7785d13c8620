use clap::{Parser, Subcommand};
use docport::{config, migrate, outline, output, sync};
use std::path::PathBuf;

/// Release builds report the crate version; anything else reports the commit
/// it was built from, so `--version` output in a bug report is traceable.
fn version_string() -> &'static str {
    if env!("DOCPORT_RELEASE") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("DOCPORT_COMMIT") {
        "" => concat!(env!("CARGO_PKG_VERSION"), "-dev"),
        // Leaking is fine: built once, lives for the whole process.
        commit => Box::leak(
            format!("{}-dev+{commit}", env!("CARGO_PKG_VERSION")).into_boxed_str(),
        ),
    }
}

#[derive(Parser)]
#[command(name = "docport")]
#[command(about = "Migrate legacy GitBook-style docs into MDX with navigation manifests")]
#[command(long_about = "\
Migrate legacy GitBook-style docs into MDX with navigation manifests

The outline document (SUMMARY.md) is the source of truth: a nested bullet
list mapping titles to source files, where indentation (2 spaces per level)
encodes the hierarchy.

Outline format:

  - [Getting Started](intro/README.md)
  - [Advanced](adv/README.md)
    - [Memory Layout](adv/a.md)
    - [Profiling](adv/b.md)

Produced output:

  content/docs/
  ├── meta.json                  # Root navigation manifest
  ├── intro/
  │   └── index.mdx              # README.md becomes the directory index
  └── adv/
      ├── meta.json
      ├── a.mdx
      └── b.mdx

Each .mdx file gets fresh frontmatter from the outline title; relative
image paths are rooted and internal .md links become site routes.

Run 'docport gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Path to config.toml
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Legacy documentation tree (overrides config)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory for .mdx files and manifests (overrides config)
    #[arg(long, global = true)]
    target: Option<PathBuf>,

    /// Outline document path (overrides config)
    #[arg(long, global = true)]
    summary: Option<PathBuf>,

    /// Site route prefix for rewritten links (overrides config)
    #[arg(long, global = true)]
    route_root: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the outline document and print the resulting tree
    Outline,
    /// Resolve the outline against the source tree without writing
    Check,
    /// Run the full migration: materialize files and write manifests
    Migrate,
    /// Verify a translated tree still mirrors a reference tree's structure
    SyncCheck {
        /// Migrated tree of the source locale
        #[arg(long)]
        reference: PathBuf,
        /// Translated tree to check against it
        #[arg(long)]
        translation: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load_config(&cli.config)?;
    if let Some(source) = cli.source {
        config.source_root = source;
    }
    if let Some(target) = cli.target {
        config.target_root = target;
    }
    if let Some(summary) = cli.summary {
        config.summary = Some(summary);
    }
    if let Some(route_root) = cli.route_root {
        config.route_root = route_root;
    }
    config.validate()?;

    match cli.command {
        Command::Outline => {
            let summary_path = config.summary_path();
            let text = std::fs::read_to_string(&summary_path)
                .map_err(|e| format!("cannot read outline document {}: {e}", summary_path.display()))?;
            let parsed = outline::parse(&text, &config.source_ext);
            output::print_outline_output(&parsed.nodes);
            for warning in &parsed.warnings {
                println!("Warning: {warning}");
            }
        }
        Command::Check => {
            println!("==> Checking {}", config.summary_path().display());
            let report = migrate::verify(&config)?;
            output::print_migrate_output(&report, true);
        }
        Command::Migrate => {
            println!(
                "==> Migrating {} \u{2192} {}",
                config.summary_path().display(),
                config.target_root.display()
            );
            let report = migrate::migrate(&config)?;
            output::print_migrate_output(&report, false);
        }
        Command::SyncCheck {
            reference,
            translation,
        } => {
            println!(
                "==> Comparing {} against {}",
                translation.display(),
                reference.display()
            );
            let report = sync::sync_check(&reference, &translation, &config.sync.path_map)?;
            output::print_sync_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
