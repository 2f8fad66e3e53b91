use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AssetLibError;

/// Which half of the library a reconciliation run covers.
///
/// The kind is a per-run selector, not a per-record attribute: it decides
/// which rendition variants an asset is expected to have and names the
/// folder its renditions live under (`<renditions_root>/<kind>/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Raster images (png, gif, jpg, ...)
    Image,
    /// Vector drawings (svg), rasterised to both jpg and png
    Drawing,
}

impl AssetKind {
    /// Folder segment used under the renditions root
    pub fn folder(&self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Drawing => "drawings",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder())
    }
}

impl FromStr for AssetKind {
    type Err = AssetLibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" | "images" => Ok(AssetKind::Image),
            "drawing" | "drawings" => Ok(AssetKind::Drawing),
            other => Err(AssetLibError::InvalidInput {
                reason: format!("unknown asset kind `{other}` (expected image or drawing)"),
            }),
        }
    }
}
