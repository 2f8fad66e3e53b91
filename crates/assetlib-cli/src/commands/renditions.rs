//! Renditions command
//!
//! Usage: assetlib renditions <ASSET_PATH> --renditions-root <DIR> [--kind drawing]

use std::path::PathBuf;

use assetlib_core::AssetKind;
use clap::Args;

#[derive(Debug, Args)]
pub struct RenditionsArgs {
    /// Original asset path, relative to the library root
    pub asset_path: String,

    #[arg(long)]
    pub kind: Option<AssetKind>,

    #[arg(long)]
    pub renditions_root: Option<String>,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Print one expected rendition path per line
pub fn execute(args: RenditionsArgs) -> anyhow::Result<()> {
    let settings =
        super::resolve_settings(args.config.as_deref(), args.kind, args.renditions_root)?;

    for path in settings.resolver.expected_renditions(
        &args.asset_path,
        &settings.renditions_root,
        settings.kind,
    ) {
        println!("{}", path);
    }
    Ok(())
}
