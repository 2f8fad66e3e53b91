//! Snapshot manifest parsing and generation.
//!
//! A snapshot manifest is the JSON form in which callers hand a tree state
//! to the engine:
//!
//! ```json
//! {
//!   "assets": [
//!     { "path": "photos/a.png", "content_hash": "9f2c...",
//!       "date_modified": "2024-03-01T10:00:00Z",
//!       "date_accessed": "2024-03-02T08:30:00Z" }
//!   ],
//!   "renditions": [ ... same record shape ... ]
//! }
//! ```
//!
//! `renditions` may be omitted. Any malformed record fails the whole
//! manifest: a partially read snapshot would produce a misleading delta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AssetLibError, ExError, ExErrorKind};
use crate::model::{AssetRecord, Snapshot};

const OP_PARSE: &str = "parse_snapshot_bytes";

/// Serializable manifest form of a [`Snapshot`], records in path order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotManifest {
    pub assets: Vec<AssetRecord>,
    #[serde(default)]
    pub renditions: Vec<AssetRecord>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    assets: Vec<RawRecord>,
    #[serde(default)]
    renditions: Vec<RawRecord>,
}

/// Record with every field optional so absences can be reported by name.
#[derive(Debug, Deserialize)]
struct RawRecord {
    path: Option<String>,
    content_hash: Option<String>,
    date_modified: Option<String>,
    date_accessed: Option<String>,
}

/// Parse manifest bytes into a [`Snapshot`].
///
/// # Errors
///
/// - `InvalidManifest`: bytes are not UTF-8, not JSON, the root is not an
///   object, or a field has the wrong JSON type
/// - `MissingField`: `assets` or a required record field is absent or empty
/// - `InvalidTimestamp`: a date is not RFC 3339
/// - `DuplicatePath`: a path occurs twice within one subtree
pub fn parse_snapshot_bytes(bytes: &[u8]) -> Result<Snapshot, ExError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExError::new(ExErrorKind::InvalidManifest)
            .with_op(OP_PARSE)
            .with_message(format!("manifest is not valid UTF-8: {}", e))
    })?;

    let raw: Value = serde_json::from_str(text).map_err(|e| {
        ExError::new(ExErrorKind::InvalidManifest)
            .with_op(OP_PARSE)
            .with_message(format!("manifest is not valid JSON: {}", e))
    })?;

    let obj = raw.as_object().ok_or_else(|| {
        ExError::new(ExErrorKind::InvalidManifest)
            .with_op(OP_PARSE)
            .with_message("manifest JSON root must be an object")
    })?;

    if !obj.contains_key("assets") {
        return Err(ExError::new(ExErrorKind::MissingField)
            .with_op(OP_PARSE)
            .with_message("required field `assets` is absent"));
    }

    let manifest: RawManifest = serde_json::from_value(raw).map_err(|e| {
        ExError::new(ExErrorKind::InvalidManifest)
            .with_op(OP_PARSE)
            .with_message(format!("failed to deserialize manifest: {}", e))
    })?;

    let assets = convert_records(manifest.assets)?;
    let renditions = convert_records(manifest.renditions)?;
    Snapshot::from_records(assets, renditions)
        .map_err(|e| ExError::from(e).with_op(OP_PARSE))
}

/// Build the manifest form of a snapshot.
pub fn snapshot_to_manifest(snapshot: &Snapshot) -> SnapshotManifest {
    SnapshotManifest {
        assets: snapshot.assets().cloned().collect(),
        renditions: snapshot.renditions().cloned().collect(),
    }
}

/// Serialize a snapshot to manifest JSON bytes.
///
/// # Errors
///
/// `Serialization` if JSON encoding fails.
pub fn snapshot_to_bytes(snapshot: &Snapshot) -> Result<Vec<u8>, ExError> {
    serde_json::to_vec_pretty(&snapshot_to_manifest(snapshot))
        .map_err(|e| ExError::from(AssetLibError::from(e)).with_op("snapshot_to_bytes"))
}

fn convert_records(raw: Vec<RawRecord>) -> Result<Vec<AssetRecord>, ExError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| convert_record(index, record))
        .collect()
}

fn convert_record(index: usize, raw: RawRecord) -> Result<AssetRecord, ExError> {
    let path = raw
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| {
            ExError::from(AssetLibError::MissingField {
                path: format!("#{index}"),
                field: "path".to_string(),
            })
            .with_op(OP_PARSE)
        })?;

    let required = |value: Option<String>, field: &str| {
        value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
            ExError::from(AssetLibError::MissingField {
                path: path.clone(),
                field: field.to_string(),
            })
            .with_op(OP_PARSE)
        })
    };
    let content_hash = required(raw.content_hash, "content_hash")?;
    let modified = required(raw.date_modified, "date_modified")?;
    let accessed = required(raw.date_accessed, "date_accessed")?;
    let date_modified = parse_timestamp(&path, "date_modified", modified)?;
    let date_accessed = parse_timestamp(&path, "date_accessed", accessed)?;

    AssetRecord::new(path, content_hash, date_modified, date_accessed)
        .map_err(|e| ExError::from(e).with_op(OP_PARSE))
}

fn parse_timestamp(path: &str, field: &str, value: String) -> Result<DateTime<Utc>, ExError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            ExError::from(AssetLibError::InvalidTimestamp {
                path: path.to_string(),
                field: field.to_string(),
                value,
            })
            .with_op(OP_PARSE)
        })
}
