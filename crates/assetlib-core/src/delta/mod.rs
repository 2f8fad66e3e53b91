//! Asset-library reconciliation.
//!
//! Compares two snapshots of one asset kind and classifies what the
//! regeneration job has to do.
//!
//! ## Entry point
//!
//! ```
//! use assetlib_core::delta::reconcile;
//! use assetlib_core::model::{AssetKind, Snapshot};
//!
//! let current = Snapshot::new();
//! let delta = reconcile(None, &current, AssetKind::Image, "_renditions").unwrap();
//! assert!(delta.is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no I/O, no shared state; snapshots are only read.
//! - **Determinism**: identical inputs produce identical deltas (and digests).
//! - **Partition**: each current path is unchanged, changed, added or the
//!   new side of a rename, never more than one.

pub mod digest;
pub mod engine;
pub mod human_summary;
pub mod model;
pub mod orphans;

pub use digest::compute_delta_digest;
pub use engine::{reconcile, DeltaComputer, ReconcileState};
pub use human_summary::render_human_summary;
pub use model::{AssetLibraryDelta, DeltaCounts};
pub use orphans::OrphanScanner;
