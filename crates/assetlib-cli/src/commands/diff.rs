//! Diff command
//!
//! Usage: assetlib diff --current <FILE> [--previous <FILE>] --renditions-root <DIR>

use std::path::{Path, PathBuf};

use anyhow::Context;
use assetlib_core::delta::{compute_delta_digest, render_human_summary};
use assetlib_core::logging_facility::{init, Profile};
use assetlib_core::manifest::parse_snapshot_bytes;
use assetlib_core::{AssetKind, DeltaComputer, Snapshot};
use clap::{Args, ValueEnum};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty JSON with the delta digest
    Json,
    /// Markdown summary
    Summary,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Manifest of the current tree
    #[arg(long)]
    pub current: PathBuf,

    /// Manifest of the previous tree (omit on first run)
    #[arg(long)]
    pub previous: Option<PathBuf>,

    /// Asset kind to reconcile: image or drawing
    #[arg(long)]
    pub kind: Option<AssetKind>,

    /// Root of the renditions subtree
    #[arg(long)]
    pub renditions_root: Option<String>,

    /// TOML file with the renditions root, kind and naming scheme
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Emit logs as JSON on stderr
    #[arg(long)]
    pub log_json: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> anyhow::Result<()> {
    init(if args.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let settings =
        super::resolve_settings(args.config.as_deref(), args.kind, args.renditions_root)?;

    let current = load_snapshot(&args.current)?;
    let previous = args.previous.as_deref().map(load_snapshot).transpose()?;
    info!(
        current = current.len() as u64,
        previous = previous.as_ref().map_or(0, Snapshot::len) as u64,
        "snapshots loaded"
    );

    let delta = DeltaComputer::new(settings.resolver).compute(
        previous.as_ref(),
        &current,
        settings.kind,
        &settings.renditions_root,
    )?;

    match args.format {
        OutputFormat::Json => {
            let digest = compute_delta_digest(&delta)?;
            let out = serde_json::json!({
                "kind": settings.kind,
                "digest": digest,
                "delta": delta,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Summary => print!("{}", render_human_summary(&delta)),
    }

    Ok(())
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_snapshot_bytes(&bytes).with_context(|| format!("invalid manifest {}", path.display()))
}
