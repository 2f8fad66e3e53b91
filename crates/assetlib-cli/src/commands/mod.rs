pub mod diff;
pub mod renditions;

use std::path::Path;

use anyhow::{bail, Context};
use assetlib_core::{AssetKind, ReconcileConfig, RenditionPathResolver};

/// Settings shared by every subcommand after merging flags over the file
pub struct Resolved {
    pub kind: AssetKind,
    pub renditions_root: String,
    pub resolver: RenditionPathResolver,
}

/// Merge command-line overrides over an optional TOML config.
///
/// Flags win over the file. The renditions root must come from one of them.
pub fn resolve_settings(
    config: Option<&Path>,
    kind: Option<AssetKind>,
    renditions_root: Option<String>,
) -> anyhow::Result<Resolved> {
    let file = config
        .map(|path| {
            ReconcileConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        })
        .transpose()?;

    let Some(renditions_root) = renditions_root
        .or_else(|| file.as_ref().map(|c| c.renditions_root.clone()))
        .filter(|root| !root.trim().is_empty())
    else {
        bail!("a renditions root is required (--renditions-root or `renditions_root` in --config)");
    };

    let kind = kind
        .or_else(|| file.as_ref().map(|c| c.kind))
        .unwrap_or(AssetKind::Image);
    let resolver = match &file {
        Some(c) => c.resolver()?,
        None => RenditionPathResolver::default(),
    };

    Ok(Resolved {
        kind,
        renditions_root,
        resolver,
    })
}
