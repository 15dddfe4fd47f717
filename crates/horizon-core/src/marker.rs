//! Restart announcement.
//!
//! Workers compare the restart marker against their own start time and stop
//! pulling work once it is newer. In fast-termination mode the wait flag
//! tells them whether to drain first. Draining itself happens in the workers.

use crate::errors::StoreError;
use crate::state::{StateStore, RESTART_MARKER_KEY, WAIT_FLAG_KEY};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestartMarker {
    /// Unix seconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaitFlag {
    pub enabled: bool,
}

/// What one publish call wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublishedMarker {
    pub restart_marker: RestartMarker,
    /// `None` when fast termination is off and the flag was left untouched.
    pub wait_flag: Option<WaitFlag>,
}

#[derive(Debug, Clone, Copy)]
pub struct RestartMarkerPublisher {
    fast_termination: bool,
}

impl RestartMarkerPublisher {
    pub fn new(fast_termination: bool) -> Self {
        Self { fast_termination }
    }

    pub fn fast_termination(&self) -> bool {
        self.fast_termination
    }

    /// Write the wait flag (fast termination only), then the restart marker.
    ///
    /// The marker write is attempted even when the flag write failed. A
    /// marker failure is returned ahead of a flag failure.
    pub fn publish<S>(
        &self,
        store: &S,
        wait_for_drain: bool,
        now: DateTime<Utc>,
    ) -> Result<PublishedMarker, StoreError>
    where
        S: StateStore + ?Sized,
    {
        let flag_written = if self.fast_termination {
            Some(store.put_forever(WAIT_FLAG_KEY, &Value::Bool(wait_for_drain)))
        } else {
            None
        };

        let restart_marker = RestartMarker {
            timestamp: now.timestamp(),
        };
        store.put_forever(RESTART_MARKER_KEY, &Value::from(restart_marker.timestamp))?;

        let wait_flag = match flag_written {
            Some(Err(e)) => {
                tracing::warn!(
                    timestamp = restart_marker.timestamp,
                    "restart marker published but wait flag write failed: {e}"
                );
                return Err(e);
            }
            Some(Ok(())) => Some(WaitFlag {
                enabled: wait_for_drain,
            }),
            None => None,
        };

        tracing::info!(
            timestamp = restart_marker.timestamp,
            wait_flag = ?wait_flag.map(|w| w.enabled),
            "restart marker published"
        );

        Ok(PublishedMarker {
            restart_marker,
            wait_flag,
        })
    }
}

/// Read back the current marker and flag, if any were ever written.
pub fn read_published<S>(store: &S) -> Result<(Option<RestartMarker>, Option<WaitFlag>), StoreError>
where
    S: StateStore + ?Sized,
{
    let marker = store
        .get(RESTART_MARKER_KEY)?
        .and_then(|v| v.as_i64())
        .map(|timestamp| RestartMarker { timestamp });
    let wait = store
        .get(WAIT_FLAG_KEY)?
        .and_then(|v| v.as_bool())
        .map(|enabled| WaitFlag { enabled });
    Ok((marker, wait))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SqliteStateStore;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn put_forever(&self, key: &str, _value: &Value) -> Result<(), StoreError> {
            Err(StoreError::Write {
                key: key.to_string(),
                detail: "database is locked".to_string(),
            })
        }

        fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
            Ok(None)
        }
    }

    /// Rejects writes to one key, delegating the rest to SQLite.
    struct RejectingKey {
        inner: SqliteStateStore,
        rejected: &'static str,
    }

    impl RejectingKey {
        fn new(rejected: &'static str) -> Self {
            Self {
                inner: SqliteStateStore::memory().unwrap(),
                rejected,
            }
        }
    }

    impl StateStore for RejectingKey {
        fn put_forever(&self, key: &str, value: &Value) -> Result<(), StoreError> {
            if key == self.rejected {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    detail: "disk I/O error".to_string(),
                });
            }
            self.inner.put_forever(key, value)
        }

        fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
            self.inner.get(key)
        }
    }

    #[test]
    fn failed_wait_flag_write_still_publishes_marker() {
        let store = RejectingKey::new(WAIT_FLAG_KEY);

        let err = RestartMarkerPublisher::new(true)
            .publish(&store, true, at(77))
            .unwrap_err();

        assert!(matches!(err, StoreError::Write { ref key, .. } if key == WAIT_FLAG_KEY));
        assert_eq!(store.get(RESTART_MARKER_KEY).unwrap(), Some(json!(77)));
        assert_eq!(store.get(WAIT_FLAG_KEY).unwrap(), None);
    }

    #[test]
    fn failed_marker_write_reports_the_marker_key() {
        let store = RejectingKey::new(RESTART_MARKER_KEY);

        let err = RestartMarkerPublisher::new(true)
            .publish(&store, false, at(5))
            .unwrap_err();

        assert!(matches!(err, StoreError::Write { ref key, .. } if key == RESTART_MARKER_KEY));
        assert_eq!(store.get(WAIT_FLAG_KEY).unwrap(), Some(json!(false)));
    }

    #[test]
    fn marker_lands_on_the_key_queue_workers_poll() {
        let store = SqliteStateStore::memory().unwrap();
        RestartMarkerPublisher::new(false)
            .publish(&store, false, at(9))
            .unwrap();
        assert_eq!(store.get("illuminate:queue:restart").unwrap(), Some(json!(9)));
    }

    #[test]
    fn marker_written_without_flag_when_fast_termination_off() {
        let store = SqliteStateStore::memory().unwrap();
        store.put_forever(WAIT_FLAG_KEY, &json!(true)).unwrap();

        let published = RestartMarkerPublisher::new(false)
            .publish(&store, false, at(1_700_000_123))
            .unwrap();

        assert_eq!(published.restart_marker.timestamp, 1_700_000_123);
        assert_eq!(published.wait_flag, None);
        assert_eq!(store.get(RESTART_MARKER_KEY).unwrap(), Some(json!(1_700_000_123)));
        // prior value left untouched
        assert_eq!(store.get(WAIT_FLAG_KEY).unwrap(), Some(json!(true)));
    }

    #[test]
    fn flag_mirrors_wait_option_in_fast_termination_mode() {
        let store = SqliteStateStore::memory().unwrap();
        let publisher = RestartMarkerPublisher::new(true);

        publisher.publish(&store, true, at(10)).unwrap();
        assert_eq!(store.get(WAIT_FLAG_KEY).unwrap(), Some(json!(true)));

        let published = publisher.publish(&store, false, at(20)).unwrap();
        assert_eq!(published.wait_flag, Some(WaitFlag { enabled: false }));
        assert_eq!(store.get(WAIT_FLAG_KEY).unwrap(), Some(json!(false)));
        assert_eq!(store.get(RESTART_MARKER_KEY).unwrap(), Some(json!(20)));
    }

    #[test]
    fn read_back_round_trip() {
        let store = SqliteStateStore::memory().unwrap();
        assert_eq!(read_published(&store).unwrap(), (None, None));

        RestartMarkerPublisher::new(true)
            .publish(&store, true, at(42))
            .unwrap();
        assert_eq!(
            read_published(&store).unwrap(),
            (
                Some(RestartMarker { timestamp: 42 }),
                Some(WaitFlag { enabled: true })
            )
        );
    }

    #[test]
    fn store_failure_propagates() {
        let err = RestartMarkerPublisher::new(false)
            .publish(&BrokenStore, false, at(1))
            .unwrap_err();
        assert!(matches!(err, StoreError::Write { ref key, .. } if key == RESTART_MARKER_KEY));
    }
}
