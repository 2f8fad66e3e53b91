use std::collections::BTreeMap;

use crate::errors::{AssetLibError, Result};

use super::record::AssetRecord;

/// Point-in-time view of one asset tree and its renditions subtree.
///
/// Both subtrees are keyed by path in a `BTreeMap`, so every traversal the
/// engine performs is in path order and "first match" is deterministic.
/// Rendition paths are full paths including the renditions root, e.g.
/// `_renditions/images/photos/a_thumb.png`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    assets: BTreeMap<String, AssetRecord>,
    renditions: BTreeMap<String, AssetRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from record lists.
    ///
    /// # Errors
    ///
    /// `DuplicatePath` if a path occurs twice within the same subtree.
    pub fn from_records(
        assets: impl IntoIterator<Item = AssetRecord>,
        renditions: impl IntoIterator<Item = AssetRecord>,
    ) -> Result<Self> {
        let mut snapshot = Self::new();
        for record in assets {
            snapshot.insert_asset(record)?;
        }
        for record in renditions {
            snapshot.insert_rendition(record)?;
        }
        Ok(snapshot)
    }

    /// Add an original asset.
    ///
    /// # Errors
    ///
    /// `DuplicatePath` if the path is already present.
    pub fn insert_asset(&mut self, record: AssetRecord) -> Result<()> {
        insert_unique(&mut self.assets, record)
    }

    /// Add a rendition record.
    ///
    /// # Errors
    ///
    /// `DuplicatePath` if the path is already present.
    pub fn insert_rendition(&mut self, record: AssetRecord) -> Result<()> {
        insert_unique(&mut self.renditions, record)
    }

    pub fn asset(&self, path: &str) -> Option<&AssetRecord> {
        self.assets.get(path)
    }

    pub fn rendition(&self, path: &str) -> Option<&AssetRecord> {
        self.renditions.get(path)
    }

    pub fn contains_asset(&self, path: &str) -> bool {
        self.assets.contains_key(path)
    }

    /// Original assets in path order
    pub fn assets(&self) -> impl Iterator<Item = &AssetRecord> {
        self.assets.values()
    }

    /// Rendition records in path order
    pub fn renditions(&self) -> impl Iterator<Item = &AssetRecord> {
        self.renditions.values()
    }

    pub fn asset_paths(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(|k| k.as_str())
    }

    /// Renditions whose path starts with `prefix`, in path order
    pub fn renditions_under<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a AssetRecord> + 'a {
        self.renditions
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(move |(path, _)| path.starts_with(prefix))
            .map(|(_, record)| record)
    }

    /// Number of original assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn rendition_count(&self) -> usize {
        self.renditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

fn insert_unique(map: &mut BTreeMap<String, AssetRecord>, record: AssetRecord) -> Result<()> {
    if map.contains_key(&record.path) {
        return Err(AssetLibError::DuplicatePath { path: record.path });
    }
    map.insert(record.path.clone(), record);
    Ok(())
}
