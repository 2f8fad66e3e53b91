//! Deterministic digest of a delta.
//!
//! The delta serializes with sorted collections, so equal deltas always
//! produce equal canonical JSON and therefore equal digests. The apply step
//! uses this to recognise a delta it has already acted on.

use sha2::{Digest, Sha256};

use crate::delta::model::AssetLibraryDelta;
use crate::errors::Result;

/// Hex-encoded SHA256 of the delta's canonical JSON (64 characters).
///
/// # Errors
///
/// Returns `AssetLibError::Serialization` if JSON serialization fails.
///
/// # Example
///
/// ```
/// use assetlib_core::delta::{compute_delta_digest, AssetLibraryDelta};
///
/// let digest = compute_delta_digest(&AssetLibraryDelta::default()).unwrap();
/// assert_eq!(digest.len(), 64);
/// ```
pub fn compute_delta_digest(delta: &AssetLibraryDelta) -> Result<String> {
    let canonical = serde_json::to_string(delta)?;
    Ok(hash_string(&canonical))
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
