//! Durable, process-wide key/value state shared with worker processes.
//!
//! Writers overwrite; the last write to a key wins.

mod schema;
mod sqlite;

pub use schema::STATE_SCHEMA;
pub use sqlite::SqliteStateStore;

use crate::errors::StoreError;
use serde_json::Value;

/// Unix-seconds timestamp of the latest restart request. Queue workers poll
/// this exact key, so it is shared with them rather than namespaced here.
pub const RESTART_MARKER_KEY: &str = "illuminate:queue:restart";

/// Whether workers should drain in-flight work before stopping.
pub const WAIT_FLAG_KEY: &str = "horizon:terminate:wait";

pub trait StateStore {
    /// Store `value` under `key` with no expiry. Each call is atomic.
    fn put_forever(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
}
