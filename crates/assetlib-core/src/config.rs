//! Reconciliation run configuration.
//!
//! Loaded from TOML by callers that keep their settings in a file:
//!
//! ```toml
//! renditions_root = "_renditions"
//! kind = "image"
//!
//! [renditions]
//! thumbnail_template = "{name}_thumb"
//! thumbnail_extension = ".png"
//! ```
//!
//! `renditions_root` has no default: the engine never guesses where the
//! renditions subtree lives.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{AssetLibError, Result};
use crate::model::AssetKind;
use crate::rendition::{RenditionConfig, RenditionPathResolver};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconcileConfig {
    pub renditions_root: String,

    #[serde(default = "default_kind")]
    pub kind: AssetKind,

    #[serde(default)]
    pub renditions: RenditionConfig,
}

fn default_kind() -> AssetKind {
    AssetKind::Image
}

impl ReconcileConfig {
    pub fn new(renditions_root: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            renditions_root: renditions_root.into(),
            kind,
            renditions: RenditionConfig::default(),
        }
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for malformed TOML, unknown keys, an empty
    /// `renditions_root`, or an invalid naming scheme.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ReconcileConfig =
            toml::from_str(text).map_err(|e| AssetLibError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AssetLibError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// `InvalidConfig` when `renditions_root` is blank or the naming scheme
    /// is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.renditions_root.trim().is_empty() {
            return Err(AssetLibError::InvalidConfig {
                reason: "renditions_root must not be empty".to_string(),
            });
        }
        self.renditions.validate()
    }

    /// # Errors
    ///
    /// `InvalidConfig` if the naming scheme is invalid.
    pub fn resolver(&self) -> Result<RenditionPathResolver> {
        RenditionPathResolver::new(self.renditions.clone())
    }
}
