//! SQLite schema for durable coordination state.
//!
//! Tables:
//! - `kv_state`: one row per key, overwritten in place, never expires

/// DDL for the durable state store.
///
/// Schema version: 1
pub const STATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_state (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
