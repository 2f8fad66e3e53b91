pub mod kind;
pub mod record;
pub mod snapshot;

pub use kind::AssetKind;
pub use record::AssetRecord;
pub use snapshot::Snapshot;
