use assetlib_core::{AssetKind, AssetRecord, RenditionPathResolver, Snapshot};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Renditions root used throughout the integration tests
#[allow(dead_code)]
pub const ROOT: &str = "_renditions";

/// Timestamp `n` minutes after a fixed epoch
#[allow(dead_code)]
pub fn t(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() + Duration::minutes(n)
}

#[allow(dead_code)]
pub fn asset(path: &str, hash: &str, modified: i64, accessed: i64) -> AssetRecord {
    AssetRecord::new(path, hash, t(modified), t(accessed)).unwrap()
}

/// Fluent snapshot builder for test setup
#[derive(Default)]
#[allow(dead_code)]
pub struct SnapshotBuilder {
    assets: Vec<AssetRecord>,
    renditions: Vec<AssetRecord>,
}

#[allow(dead_code)]
impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset(mut self, path: &str, hash: &str, modified: i64, accessed: i64) -> Self {
        self.assets.push(asset(path, hash, modified, accessed));
        self
    }

    pub fn rendition(mut self, path: &str, modified: i64, accessed: i64) -> Self {
        self.renditions
            .push(asset(path, &format!("r:{path}"), modified, accessed));
        self
    }

    /// Add every rendition the default resolver expects for `path`,
    /// stamped with the given times.
    pub fn renditions_for(
        mut self,
        path: &str,
        kind: AssetKind,
        modified: i64,
        accessed: i64,
    ) -> Self {
        let resolver = RenditionPathResolver::default();
        for p in resolver.expected_renditions(path, ROOT, kind) {
            self.renditions
                .push(asset(&p, &format!("r:{p}"), modified, accessed));
        }
        self
    }

    pub fn build(self) -> Snapshot {
        Snapshot::from_records(self.assets, self.renditions).unwrap()
    }
}
