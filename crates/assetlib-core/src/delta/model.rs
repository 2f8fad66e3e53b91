//! Delta output types.
//!
//! Collections are `BTreeSet`/`BTreeMap` so serialization and iteration
//! order are deterministic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Classified differences between two snapshots of one asset kind.
///
/// Built empty and filled once per reconciliation run, then handed to the
/// caller by value. A path appears in at most one of `added`, `changed`,
/// `removed` and `renamed` (as old or new path). `renamed` is bijective.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLibraryDelta {
    /// New content at a new path
    pub added: BTreeSet<String>,
    /// Same path, different content hash
    pub changed: BTreeSet<String>,
    /// Old path to new path for content that moved
    pub renamed: BTreeMap<String, String>,
    /// Paths gone from the current snapshot and not renamed
    pub removed: BTreeSet<String>,
    /// Original asset paths whose renditions are missing or stale
    pub invalid_renditions: BTreeSet<String>,
    /// Rendition paths with no live owner
    pub orphaned_renditions: BTreeSet<String>,
}

/// Collection sizes of a delta, for logs and reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaCounts {
    pub added: usize,
    pub changed: usize,
    pub renamed: usize,
    pub removed: usize,
    pub invalid_renditions: usize,
    pub orphaned_renditions: usize,
}

impl AssetLibraryDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the two snapshots need no follow-up work
    pub fn is_empty(&self) -> bool {
        self.counts() == DeltaCounts::default()
    }

    pub fn counts(&self) -> DeltaCounts {
        DeltaCounts {
            added: self.added.len(),
            changed: self.changed.len(),
            renamed: self.renamed.len(),
            removed: self.removed.len(),
            invalid_renditions: self.invalid_renditions.len(),
            orphaned_renditions: self.orphaned_renditions.len(),
        }
    }

    /// Original assets whose renditions must be (re)generated:
    /// added, changed and invalid-rendition paths.
    pub fn paths_to_regenerate(&self) -> BTreeSet<&str> {
        self.added
            .iter()
            .chain(&self.changed)
            .chain(&self.invalid_renditions)
            .map(String::as_str)
            .collect()
    }

    /// Paths whose derived data must be discarded: removed assets and
    /// orphaned renditions.
    pub fn paths_to_discard(&self) -> BTreeSet<&str> {
        self.removed
            .iter()
            .chain(&self.orphaned_renditions)
            .map(String::as_str)
            .collect()
    }

    /// Metadata relinks to apply, old path to new path
    pub fn relinks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.renamed.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Whether `path` is the new path of a rename
    pub fn is_rename_target(&self, path: &str) -> bool {
        self.renamed.values().any(|p| p == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_delta() {
        let delta = AssetLibraryDelta::new();
        assert!(delta.is_empty());
        assert_eq!(delta.counts(), DeltaCounts::default());
    }

    #[test]
    fn test_regenerate_merges_and_dedups() {
        let mut delta = AssetLibraryDelta::new();
        delta.added.insert("n.png".to_string());
        delta.changed.insert("c.png".to_string());
        delta.invalid_renditions.insert("c.png".to_string());
        delta.invalid_renditions.insert("old.gif".to_string());
        let paths: Vec<&str> = delta.paths_to_regenerate().into_iter().collect();
        assert_eq!(paths, vec!["c.png", "n.png", "old.gif"]);
        assert!(!delta.is_empty());
    }

    #[test]
    fn test_discard_and_relinks() {
        let mut delta = AssetLibraryDelta::new();
        delta.removed.insert("gone.png".to_string());
        delta
            .orphaned_renditions
            .insert("_r/images/x_thumb.png".to_string());
        delta
            .renamed
            .insert("a.png".to_string(), "b.png".to_string());
        assert_eq!(delta.paths_to_discard().len(), 2);
        assert_eq!(delta.relinks().collect::<Vec<_>>(), vec![("a.png", "b.png")]);
        assert!(delta.is_rename_target("b.png"));
        assert!(!delta.is_rename_target("a.png"));
    }
}
