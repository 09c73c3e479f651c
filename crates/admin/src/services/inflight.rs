//! Duplicate-submission guard.
//!
//! A browser can post the same form twice (double click, resubmit on
//! reload). While one submission for a key is being processed, a second one
//! is refused instead of reaching the backend.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Set of actions currently being processed.
///
/// Cheap to clone; all clones share one set.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

/// Releases its key when dropped, whether the action succeeded or failed.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for one action on one record, e.g. `bookings:12:status`.
    #[must_use]
    pub fn key(resource: &str, id: impl std::fmt::Display, action: &str) -> String {
        format!("{resource}:{id}:{action}")
    }

    /// Claim `key`, or `None` if a submission for it is already running.
    #[must_use]
    pub fn try_begin(&self, key: impl Into<String>) -> Option<InFlightGuard> {
        let key = key.into();
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            tracing::warn!(key = %key, "duplicate submission refused");
            return None;
        }
        Some(InFlightGuard {
            keys: Arc::clone(&self.keys),
            key,
        })
    }

    /// Whether `key` is currently claimed.
    #[must_use]
    pub fn is_busy(&self, key: &str) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    /// Number of actions in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InFlightGuard {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_refused_until_drop() {
        let inflight = InFlight::new();
        let key = InFlight::key("bookings", 12, "status");
        assert_eq!(key, "bookings:12:status");

        let guard = inflight.try_begin(key.clone());
        assert!(guard.is_some());
        assert!(inflight.is_busy(&key));
        assert!(inflight.try_begin(key.clone()).is_none());

        drop(guard);
        assert!(!inflight.is_busy(&key));
        assert!(inflight.try_begin(key).is_some());
    }

    #[test]
    fn test_keys_are_independent() {
        let inflight = InFlight::new();
        let _a = inflight.try_begin("bookings:1:status");
        let _b = inflight.try_begin("bookings:2:status");
        let _c = inflight.try_begin("bookings:1:delete");
        assert_eq!(inflight.len(), 3);
    }

    #[test]
    fn test_clones_share_state() {
        let inflight = InFlight::new();
        let other = inflight.clone();
        let _guard = inflight.try_begin("users:3:status");
        assert!(other.try_begin("users:3:status").is_none());
    }

    #[test]
    fn test_released_on_early_return() {
        fn fails(inflight: &InFlight) -> Result<(), &'static str> {
            let _guard = inflight.try_begin("listings:4:delete").ok_or("busy")?;
            Err("backend said no")
        }

        let inflight = InFlight::new();
        assert_eq!(fails(&inflight), Err("backend said no"));
        assert!(inflight.is_empty());
    }
}
