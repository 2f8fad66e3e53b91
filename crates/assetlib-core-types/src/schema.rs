//! Canonical schema constants for structured logging and events
//!
//! These constants keep log fields consistent between the engine, the CLI
//! and test assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Reconciliation inputs
pub const FIELD_ASSET_KIND: &str = "asset_kind";
pub const FIELD_RENDITIONS_ROOT: &str = "renditions_root";
pub const FIELD_PASS: &str = "pass";

// Collection sizes
pub const FIELD_PREVIOUS_LEN: &str = "previous_len";
pub const FIELD_CURRENT_LEN: &str = "current_len";
pub const FIELD_ADDED: &str = "added";
pub const FIELD_CHANGED: &str = "changed";
pub const FIELD_RENAMED: &str = "renamed";
pub const FIELD_REMOVED: &str = "removed";
pub const FIELD_INVALID_RENDITIONS: &str = "invalid_renditions";
pub const FIELD_ORPHANED_RENDITIONS: &str = "orphaned_renditions";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_MESSAGE: &str = "err_message";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
