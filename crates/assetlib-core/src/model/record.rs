use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AssetLibError, Result};

/// One file in a snapshot: an original asset or a derived rendition.
///
/// `path` is the logical identity within its snapshot subtree. `content_hash`
/// identifies content and is treated as opaque; two unrelated files may share
/// one. Records are read-only once built; per-run classification state is
/// kept by the engine, never on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Slash-separated path, unique within its subtree
    pub path: String,

    /// Opaque content fingerprint
    pub content_hash: String,

    /// Last content modification
    pub date_modified: DateTime<Utc>,

    /// Last access; bumped by moves, drives rename direction
    pub date_accessed: DateTime<Utc>,
}

impl AssetRecord {
    /// Build a record, rejecting empty identity fields.
    ///
    /// # Errors
    ///
    /// `MissingField` when `path` or `content_hash` is empty.
    pub fn new(
        path: impl Into<String>,
        content_hash: impl Into<String>,
        date_modified: DateTime<Utc>,
        date_accessed: DateTime<Utc>,
    ) -> Result<Self> {
        let path = path.into();
        let content_hash = content_hash.into();
        if path.trim().is_empty() {
            return Err(AssetLibError::MissingField {
                path: "<unknown>".to_string(),
                field: "path".to_string(),
            });
        }
        if content_hash.trim().is_empty() {
            return Err(AssetLibError::MissingField {
                path,
                field: "content_hash".to_string(),
            });
        }
        Ok(Self {
            path,
            content_hash,
            date_modified,
            date_accessed,
        })
    }
}
