//! Asset-library reconciliation engine
//!
//! Given two successive snapshots of an image or drawing library together
//! with its derived renditions (thumbnails and format conversions), this
//! crate computes which assets were added, changed, renamed or removed, and
//! which renditions are stale or orphaned. It is a pure computation: it
//! never touches the file system, hashes content or talks to a service.
//!
//! - Data model: [`AssetRecord`], [`Snapshot`], [`AssetKind`]
//! - Rendition naming: [`RenditionPathResolver`]
//! - Comparison: [`DeltaComputer`] and [`OrphanScanner`], producing an
//!   [`AssetLibraryDelta`]
//! - Snapshot manifests (JSON), delta digests and Markdown summaries
//! - Error and logging facilities shared with the CLI

pub mod config;
pub mod delta;
pub mod errors;
pub mod logging_facility;
pub mod manifest;
pub mod model;
pub mod rendition;

// Re-export commonly used types
pub use config::ReconcileConfig;
pub use delta::{reconcile, AssetLibraryDelta, DeltaComputer, OrphanScanner};
pub use errors::{AssetLibError, ExError, ExErrorKind, Result};
pub use model::{AssetKind, AssetRecord, Snapshot};
pub use rendition::{RenditionConfig, RenditionPathResolver};
