//! Delta computation engine.
//!
//! [`DeltaComputer::compute`] compares two snapshots of one asset kind in
//! five ordered passes and hands the result to the [`OrphanScanner`]:
//!
//! 1. changed: same path, different content hash
//! 2. added: content hash unknown to the previous snapshot
//! 3. renamed: previous content that reappears at a new path with a later
//!    access time
//! 4. removed: previous paths with no current counterpart and no rename
//! 5. invalid renditions: current assets whose renditions are missing or
//!    older than the asset
//!
//! Per-run bookkeeping lives in [`ReconcileState`]; snapshots are only read.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracing::debug;

use crate::delta::model::AssetLibraryDelta;
use crate::delta::orphans::OrphanScanner;
use crate::errors::{AssetLibError, ExError};
use crate::model::{AssetKind, AssetRecord, Snapshot};
use crate::rendition::RenditionPathResolver;
use crate::{log_op_end, log_op_error, log_op_start};

const OP_RECONCILE: &str = "reconcile";

/// Bookkeeping scoped to one `compute` call.
#[derive(Debug, Default)]
pub struct ReconcileState {
    /// Current paths already classified
    pub visited_current: BTreeSet<String>,
    /// Previous paths already classified
    pub visited_previous: BTreeSet<String>,
    /// Current paths claimed as the new side of a rename
    pub rename_targets: BTreeSet<String>,
    /// Rendition paths known to belong to a live asset
    pub in_use: BTreeSet<String>,
}

/// Runs the five comparison passes and the orphan scan.
#[derive(Debug, Clone, Default)]
pub struct DeltaComputer {
    resolver: RenditionPathResolver,
}

impl DeltaComputer {
    pub fn new(resolver: RenditionPathResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &RenditionPathResolver {
        &self.resolver
    }

    /// Compare `previous` with `current` and classify every difference.
    ///
    /// Without a previous snapshot every current asset is reported as added
    /// and nothing else is computed.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `renditions_root` is blank.
    pub fn compute(
        &self,
        previous: Option<&Snapshot>,
        current: &Snapshot,
        kind: AssetKind,
        renditions_root: &str,
    ) -> Result<AssetLibraryDelta, ExError> {
        let started = Instant::now();
        log_op_start!(
            OP_RECONCILE,
            asset_kind = kind.folder(),
            renditions_root = renditions_root,
            previous_len = previous.map_or(0, Snapshot::len) as u64,
            current_len = current.len() as u64,
        );

        match self.compute_inner(previous, current, kind, renditions_root) {
            Ok(delta) => {
                let counts = delta.counts();
                log_op_end!(
                    OP_RECONCILE,
                    duration_ms = started.elapsed().as_millis() as u64,
                    added = counts.added as u64,
                    changed = counts.changed as u64,
                    renamed = counts.renamed as u64,
                    removed = counts.removed as u64,
                    invalid_renditions = counts.invalid_renditions as u64,
                    orphaned_renditions = counts.orphaned_renditions as u64,
                );
                Ok(delta)
            }
            Err(err) => {
                log_op_error!(
                    OP_RECONCILE,
                    err.clone(),
                    duration_ms = started.elapsed().as_millis() as u64
                );
                Err(ExError::from(err).with_op(OP_RECONCILE))
            }
        }
    }

    fn compute_inner(
        &self,
        previous: Option<&Snapshot>,
        current: &Snapshot,
        kind: AssetKind,
        renditions_root: &str,
    ) -> Result<AssetLibraryDelta, AssetLibError> {
        if renditions_root.trim().is_empty() {
            return Err(AssetLibError::InvalidInput {
                reason: "renditions root must not be empty".to_string(),
            });
        }

        let mut delta = AssetLibraryDelta::new();
        let Some(previous) = previous else {
            delta.added = current.asset_paths().map(str::to_string).collect();
            debug!(added = delta.added.len() as u64, "no previous snapshot");
            return Ok(delta);
        };

        let mut state = ReconcileState::default();
        self.mark_changed(previous, current, &mut state, &mut delta);
        self.mark_added(previous, current, &mut state, &mut delta);
        self.mark_renamed(previous, current, kind, renditions_root, &mut state, &mut delta);
        self.mark_removed(previous, current, &mut delta);
        self.mark_invalid_renditions(current, kind, renditions_root, &state, &mut delta);

        delta.orphaned_renditions = OrphanScanner::new(&self.resolver).scan(
            current,
            kind,
            renditions_root,
            &mut state.in_use,
            &delta.renamed,
        );

        Ok(delta)
    }

    /// Pass 1: same path, different content.
    fn mark_changed(
        &self,
        previous: &Snapshot,
        current: &Snapshot,
        state: &mut ReconcileState,
        delta: &mut AssetLibraryDelta,
    ) {
        for record in current.assets() {
            if state.visited_current.contains(&record.path) {
                continue;
            }
            let Some(before) = previous.asset(&record.path) else {
                continue;
            };
            if before.content_hash != record.content_hash {
                delta.changed.insert(record.path.clone());
                state.visited_current.insert(record.path.clone());
                state.visited_previous.insert(before.path.clone());
            }
        }
        debug!(pass = 1u64, changed = delta.changed.len() as u64, "changed pass");
    }

    /// Pass 2: content not seen anywhere in the previous snapshot.
    ///
    /// Records whose hash did exist before are only marked visited here;
    /// pass 3 decides whether they moved.
    fn mark_added(
        &self,
        previous: &Snapshot,
        current: &Snapshot,
        state: &mut ReconcileState,
        delta: &mut AssetLibraryDelta,
    ) {
        let previous_hashes: BTreeSet<&str> =
            previous.assets().map(|r| r.content_hash.as_str()).collect();

        for record in current.assets() {
            if state.visited_current.contains(&record.path) {
                continue;
            }
            if !previous_hashes.contains(record.content_hash.as_str()) {
                delta.added.insert(record.path.clone());
            }
            state.visited_current.insert(record.path.clone());
        }
        debug!(pass = 2u64, added = delta.added.len() as u64, "added pass");
    }

    /// Pass 3: previous content that now lives at another path.
    ///
    /// A previous record is skipped when its own path still exists in the
    /// current snapshot (a copy, not a move). Candidates are current records
    /// with the same hash at a path that is new to this snapshot and not yet
    /// claimed; the first one, in path order, accessed strictly later than
    /// the previous record wins.
    fn mark_renamed(
        &self,
        previous: &Snapshot,
        current: &Snapshot,
        kind: AssetKind,
        renditions_root: &str,
        state: &mut ReconcileState,
        delta: &mut AssetLibraryDelta,
    ) {
        let current_by_hash = index_by_hash(current);

        for before in previous.assets() {
            if state.visited_previous.contains(&before.path) {
                continue;
            }
            let Some(candidates) = current_by_hash.get(before.content_hash.as_str()) else {
                continue;
            };
            if current.contains_asset(&before.path) {
                continue;
            }

            let target = candidates.iter().find(|candidate| {
                candidate.path != before.path
                    && !previous.contains_asset(&candidate.path)
                    && !state.rename_targets.contains(&candidate.path)
                    && candidate.date_accessed > before.date_accessed
            });
            let Some(target) = target else {
                debug!(
                    path = before.path.as_str(),
                    "content reappears but no candidate is newer; not a rename"
                );
                continue;
            };

            delta
                .renamed
                .insert(before.path.clone(), target.path.clone());
            state.visited_previous.insert(before.path.clone());
            state.visited_current.insert(target.path.clone());
            state.rename_targets.insert(target.path.clone());

            // The new path's renditions may already be on disk; keep the
            // orphan scan from flagging them.
            state.in_use.insert(
                self.resolver
                    .thumbnail_path(&target.path, renditions_root, kind),
            );
            if self.resolver.needs_jpeg_rendition(&target.path) {
                state.in_use.insert(
                    self.resolver
                        .jpeg_rendition_path(&target.path, renditions_root, kind),
                );
            }
        }
        debug!(pass = 3u64, renamed = delta.renamed.len() as u64, "renamed pass");
    }

    /// Pass 4: paths that disappeared without being renamed.
    fn mark_removed(&self, previous: &Snapshot, current: &Snapshot, delta: &mut AssetLibraryDelta) {
        for before in previous.assets() {
            if !current.contains_asset(&before.path) && !delta.renamed.contains_key(&before.path) {
                delta.removed.insert(before.path.clone());
            }
        }
        debug!(pass = 4u64, removed = delta.removed.len() as u64, "removed pass");
    }

    /// Pass 5: current assets whose renditions are missing or stale.
    fn mark_invalid_renditions(
        &self,
        current: &Snapshot,
        kind: AssetKind,
        renditions_root: &str,
        state: &ReconcileState,
        delta: &mut AssetLibraryDelta,
    ) {
        for record in current.assets() {
            // A rename bumps the access time, so only existence is checked
            // for the new side of a rename.
            let check_staleness = !state.rename_targets.contains(&record.path);
            if self.renditions_invalid(record, current, kind, renditions_root, check_staleness) {
                delta.invalid_renditions.insert(record.path.clone());
            }
        }
        debug!(
            pass = 5u64,
            invalid_renditions = delta.invalid_renditions.len() as u64,
            "invalid renditions pass"
        );
    }

    fn renditions_invalid(
        &self,
        asset: &AssetRecord,
        current: &Snapshot,
        kind: AssetKind,
        renditions_root: &str,
        check_staleness: bool,
    ) -> bool {
        let thumbnail = self
            .resolver
            .thumbnail_path(&asset.path, renditions_root, kind);
        match current.rendition(&thumbnail) {
            None => return true,
            Some(thumb) if check_staleness => {
                if thumb.date_accessed < asset.date_accessed
                    || thumb.date_modified < asset.date_modified
                {
                    return true;
                }
            }
            Some(_) => {}
        }

        if self.resolver.needs_jpeg_rendition(&asset.path) {
            let jpeg = self
                .resolver
                .jpeg_rendition_path(&asset.path, renditions_root, kind);
            // Only access time is compared for the jpeg leg.
            match current.rendition(&jpeg) {
                None => return true,
                Some(jpg) if check_staleness && jpg.date_accessed < asset.date_accessed => {
                    return true
                }
                Some(_) => {}
            }
        }

        false
    }
}

/// Reconcile with the default rendition naming scheme.
///
/// # Errors
///
/// As [`DeltaComputer::compute`].
pub fn reconcile(
    previous: Option<&Snapshot>,
    current: &Snapshot,
    kind: AssetKind,
    renditions_root: &str,
) -> Result<AssetLibraryDelta, ExError> {
    DeltaComputer::default().compute(previous, current, kind, renditions_root)
}

/// Group a snapshot's assets by content hash, each group in path order.
fn index_by_hash(snapshot: &Snapshot) -> BTreeMap<&str, Vec<&AssetRecord>> {
    let mut index: BTreeMap<&str, Vec<&AssetRecord>> = BTreeMap::new();
    for record in snapshot.assets() {
        index
            .entry(record.content_hash.as_str())
            .or_default()
            .push(record);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    const ROOT: &str = "_renditions";

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn rec(path: &str, hash: &str, modified: u32, accessed: u32) -> AssetRecord {
        AssetRecord::new(path, hash, at(modified), at(accessed)).unwrap()
    }

    fn snap(assets: Vec<AssetRecord>, renditions: Vec<AssetRecord>) -> Snapshot {
        Snapshot::from_records(assets, renditions).unwrap()
    }

    #[test]
    fn test_unchanged_asset_with_fresh_renditions_yields_empty_delta() {
        let asset = rec("a.jpg", "h1", 1, 1);
        let previous = snap(vec![asset.clone()], vec![]);
        let current = snap(
            vec![asset],
            vec![rec("_renditions/images/a_thumb.png", "t", 2, 2)],
        );
        let delta = reconcile(Some(&previous), &current, AssetKind::Image, ROOT).unwrap();
        assert!(delta.is_empty(), "{delta:?}");
    }

    #[test]
    fn test_changed_takes_precedence_over_rename() {
        // a.png changed in place; b.png carries a's old content.
        let previous = snap(vec![rec("a.png", "h1", 0, 0)], vec![]);
        let current = snap(
            vec![rec("a.png", "h2", 1, 1), rec("b.png", "h1", 0, 2)],
            vec![],
        );
        let delta = reconcile(Some(&previous), &current, AssetKind::Image, ROOT).unwrap();
        assert_eq!(delta.changed.len(), 1);
        assert!(delta.renamed.is_empty());
        assert!(delta.added.is_empty());
    }

    #[test]
    fn test_rename_target_claimed_once() {
        // Two previous records with the same content, one new path.
        let previous = snap(
            vec![rec("a.png", "h1", 0, 0), rec("b.png", "h1", 0, 0)],
            vec![],
        );
        let current = snap(vec![rec("c.png", "h1", 0, 5)], vec![]);
        let delta = reconcile(Some(&previous), &current, AssetKind::Image, ROOT).unwrap();
        assert_eq!(
            delta.renamed,
            BTreeMap::from([("a.png".to_string(), "c.png".to_string())])
        );
        assert_eq!(delta.removed, BTreeSet::from(["b.png".to_string()]));
    }

    #[test]
    fn test_stale_thumbnail_by_modification() {
        let previous = snap(vec![rec("a.jpg", "h1", 1, 1)], vec![]);
        let current = snap(
            vec![rec("a.jpg", "h1", 5, 1)],
            vec![rec("_renditions/images/a_thumb.png", "t", 4, 9)],
        );
        let delta = reconcile(Some(&previous), &current, AssetKind::Image, ROOT).unwrap();
        assert!(delta.invalid_renditions.contains("a.jpg"));
    }

    #[test]
    fn test_jpeg_leg_ignores_modification_time() {
        let previous = snap(vec![rec("a.gif", "h1", 1, 1)], vec![]);
        let current = snap(
            vec![rec("a.gif", "h1", 5, 3)],
            vec![
                rec("_renditions/images/a_thumb.png", "t", 6, 6),
                // Older modification, newer access: not stale for the jpeg leg.
                rec("_renditions/images/a.jpg", "j", 0, 3),
            ],
        );
        let delta = reconcile(Some(&previous), &current, AssetKind::Image, ROOT).unwrap();
        assert!(delta.invalid_renditions.is_empty(), "{delta:?}");
    }

    #[test]
    fn test_blank_root_is_invalid_input() {
        let current = snap(vec![rec("a.png", "h1", 0, 0)], vec![]);
        let err = reconcile(None, &current, AssetKind::Image, " ").unwrap_err();
        assert_eq!(err.kind(), crate::errors::ExErrorKind::InvalidInput);
        assert_eq!(err.op(), Some(OP_RECONCILE));
    }

    #[test]
    fn test_index_by_hash_groups_in_path_order() {
        let s = snap(
            vec![
                rec("z.png", "h1", 0, 0),
                rec("a.png", "h1", 0, 0),
                rec("m.png", "h2", 0, 0),
            ],
            vec![],
        );
        let index = index_by_hash(&s);
        let group: Vec<&str> = index["h1"].iter().map(|r| r.path.as_str()).collect();
        assert_eq!(group, vec!["a.png", "z.png"]);
    }
}
