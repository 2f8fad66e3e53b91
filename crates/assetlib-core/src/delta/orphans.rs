//! Orphaned rendition detection.
//!
//! Runs after the comparison passes. Every live asset marks the renditions
//! it owns as in use; whatever is left under `<root>/<kind>/` is an orphan
//! unless it belongs to the old path of a rename, in which case the apply
//! step relinks it instead of regenerating it.
//!
//! A rendition belongs to a renamed path when it is one of the renditions
//! that path would have produced, or when its inverse-mapped owner matches
//! the old path up to the extension (image renditions cannot tell a `.jpg`
//! source from a `.png` one).

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::model::{AssetKind, Snapshot};
use crate::rendition::{normalize_path, strip_extension, RenditionPathResolver};

pub struct OrphanScanner<'a> {
    resolver: &'a RenditionPathResolver,
}

impl<'a> OrphanScanner<'a> {
    pub fn new(resolver: &'a RenditionPathResolver) -> Self {
        Self { resolver }
    }

    /// Report renditions in the kind's subtree that no live asset owns.
    ///
    /// `in_use` may already hold marks from rename handling; it is extended
    /// with the renditions of every current asset. `renamed` maps old paths
    /// to new paths.
    pub fn scan(
        &self,
        current: &Snapshot,
        kind: AssetKind,
        renditions_root: &str,
        in_use: &mut BTreeSet<String>,
        renamed: &BTreeMap<String, String>,
    ) -> BTreeSet<String> {
        for asset in current.assets() {
            in_use.extend(
                self.resolver
                    .expected_renditions(&asset.path, renditions_root, kind),
            );
        }

        let mut renamed_renditions = BTreeSet::new();
        let mut renamed_stems = BTreeSet::new();
        for old in renamed.keys() {
            renamed_renditions.extend(
                self.resolver
                    .expected_renditions(old, renditions_root, kind)
                    .iter()
                    .map(String::as_str)
                    .map(normalize_path),
            );
            renamed_stems.insert(strip_extension(old));
        }
        let scope = self.resolver.kind_root(renditions_root, kind);

        let mut orphaned = BTreeSet::new();
        for rendition in current.renditions_under(&scope) {
            if in_use.contains(&rendition.path) {
                continue;
            }
            let owned_by_renamed = renamed_renditions.contains(&normalize_path(&rendition.path))
                || self
                    .resolver
                    .original_from_rendition_path(&rendition.path, renditions_root, kind)
                    .is_some_and(|owner| renamed_stems.contains(&strip_extension(&owner)));
            if owned_by_renamed {
                debug!(
                    rendition = rendition.path.as_str(),
                    "rendition belongs to a renamed asset; kept for relink"
                );
                continue;
            }
            orphaned.insert(rendition.path.clone());
        }

        debug!(
            orphaned_renditions = orphaned.len() as u64,
            in_use = in_use.len() as u64,
            "orphan scan"
        );
        orphaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssetRecord;
    use chrono::{TimeZone, Utc};

    fn rec(path: &str) -> AssetRecord {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        AssetRecord::new(path, "h", t, t).unwrap()
    }

    #[test]
    fn test_unowned_rendition_is_orphaned() {
        let resolver = RenditionPathResolver::default();
        let current = Snapshot::from_records(
            vec![rec("a.jpg")],
            vec![rec("_r/images/a_thumb.png"), rec("_r/images/ghost_thumb.png")],
        )
        .unwrap();
        let mut in_use = BTreeSet::new();
        let orphaned = OrphanScanner::new(&resolver).scan(
            &current,
            AssetKind::Image,
            "_r",
            &mut in_use,
            &BTreeMap::new(),
        );
        assert_eq!(
            orphaned,
            BTreeSet::from(["_r/images/ghost_thumb.png".to_string()])
        );
        assert!(in_use.contains("_r/images/a_thumb.png"));
    }

    #[test]
    fn test_other_kind_is_out_of_scope() {
        let resolver = RenditionPathResolver::default();
        let current =
            Snapshot::from_records(vec![], vec![rec("_r/drawings/x.png"), rec("other/y.png")])
                .unwrap();
        let orphaned = OrphanScanner::new(&resolver).scan(
            &current,
            AssetKind::Image,
            "_r",
            &mut BTreeSet::new(),
            &BTreeMap::new(),
        );
        assert!(orphaned.is_empty());
    }

    #[test]
    fn test_renamed_owner_suppresses_orphan() {
        let resolver = RenditionPathResolver::default();
        let current = Snapshot::from_records(
            vec![rec("new/b.png")],
            vec![rec("_r/images/old/a_thumb.png"), rec("_r/images/old/a.jpg")],
        )
        .unwrap();
        let renamed = BTreeMap::from([("old/a.png".to_string(), "new/b.png".to_string())]);
        let orphaned = OrphanScanner::new(&resolver).scan(
            &current,
            AssetKind::Image,
            "_r",
            &mut BTreeSet::new(),
            &renamed,
        );
        assert!(orphaned.is_empty(), "{orphaned:?}");
    }

    #[test]
    fn test_renamed_jpg_and_gif_suppress_their_renditions() {
        let resolver = RenditionPathResolver::default();
        let current = Snapshot::from_records(
            vec![rec("b.jpg"), rec("d.gif")],
            vec![
                rec("_r/images/a_thumb.png"),
                rec("_r/images/c_thumb.png"),
                rec("_r/images/c.jpg"),
                rec("_r/images/zz_thumb.png"),
            ],
        )
        .unwrap();
        let renamed = BTreeMap::from([
            ("a.jpg".to_string(), "b.jpg".to_string()),
            ("c.gif".to_string(), "d.gif".to_string()),
        ]);
        let orphaned = OrphanScanner::new(&resolver).scan(
            &current,
            AssetKind::Image,
            "_r",
            &mut BTreeSet::new(),
            &renamed,
        );
        assert_eq!(orphaned, BTreeSet::from(["_r/images/zz_thumb.png".to_string()]));
    }

    #[test]
    fn test_drawing_keeps_both_rasters() {
        let resolver = RenditionPathResolver::default();
        let current = Snapshot::from_records(
            vec![rec("d/x.svg")],
            vec![
                rec("_r/drawings/d/x_thumb.png"),
                rec("_r/drawings/d/x.jpg"),
                rec("_r/drawings/d/x.png"),
            ],
        )
        .unwrap();
        let orphaned = OrphanScanner::new(&resolver).scan(
            &current,
            AssetKind::Drawing,
            "_r",
            &mut BTreeSet::new(),
            &BTreeMap::new(),
        );
        assert!(orphaned.is_empty());
    }
}
