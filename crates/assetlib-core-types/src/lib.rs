//! Core types shared across the asset-library facilities
//!
//! Holds the canonical field keys and event names used by the structured
//! logging macros in `assetlib-core` and by tests that assert on captured
//! events.

pub mod schema;
