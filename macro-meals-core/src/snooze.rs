//! Snooze record for soft update prompts.
//!
//! Choosing "Later" on a soft prompt stores the current time under a single
//! key. While that timestamp is younger than the cooldown, soft prompts stay
//! hidden. The record is never cleared by the engine; it simply ages out.
//!
//! Storage failures never escape this module. A failed read means "not
//! snoozed", a failed write is logged and dropped.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::storage::KeyValueStore;

/// Storage key holding the snooze timestamp (milliseconds since epoch).
pub const SNOOZE_KEY: &str = "update_reminder_snooze";

/// Default cooldown after "Later".
pub const DEFAULT_SNOOZE_COOLDOWN: Duration = Duration::from_secs(24 * 60 * 60);

/// Reads and writes the snooze record through a [`KeyValueStore`].
#[derive(Debug)]
pub struct SnoozeStore<K> {
    store: K,
    cooldown: Duration,
}

impl<K: KeyValueStore> SnoozeStore<K> {
    /// Creates a snooze store with the default 24 hour cooldown.
    pub fn new(store: K) -> Self {
        Self::with_cooldown(store, DEFAULT_SNOOZE_COOLDOWN)
    }

    pub fn with_cooldown(store: K, cooldown: Duration) -> Self {
        Self { store, cooldown }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Underlying key-value store.
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Returns true while the last snooze is younger than the cooldown.
    pub async fn is_snooze_active(&self, now: DateTime<Utc>) -> bool {
        let Some(snoozed_at) = self.read_millis().await else {
            return false;
        };
        let elapsed = now.timestamp_millis().saturating_sub(snoozed_at);
        let cooldown = i64::try_from(self.cooldown.as_millis()).unwrap_or(i64::MAX);
        elapsed < cooldown
    }

    /// Store `now` as the latest snooze.
    pub async fn record_snooze(&self, now: DateTime<Utc>) {
        let value = now.timestamp_millis().to_string();
        match self.store.set(SNOOZE_KEY, &value).await {
            Ok(()) => tracing::debug!("Update reminder snoozed at {}", value),
            Err(e) => tracing::warn!("Failed to record update snooze: {}", e),
        }
    }

    /// When the user last chose "Later", if the record is readable.
    pub async fn last_snoozed_at(&self) -> Option<DateTime<Utc>> {
        let millis = self.read_millis().await?;
        Utc.timestamp_millis_opt(millis).single()
    }

    /// Remove the record. Only used for maintenance from the CLI.
    pub async fn clear(&self) -> Result<(), crate::storage::StorageError> {
        self.store.remove(SNOOZE_KEY).await
    }

    async fn read_millis(&self) -> Option<i64> {
        let raw = match self.store.get(SNOOZE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read update snooze: {}", e);
                return None;
            }
        };
        match raw.trim().parse::<i64>() {
            Ok(millis) => Some(millis),
            Err(_) => {
                tracing::warn!("Ignoring unparseable update snooze value '{}'", raw);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};
    use chrono::Duration as ChronoDuration;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }
    }

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[tokio::test]
    async fn test_no_record_is_not_snoozed() {
        let snooze = SnoozeStore::new(MemoryStore::new());
        assert!(!snooze.is_snooze_active(Utc::now()).await);
        assert!(snooze.last_snoozed_at().await.is_none());
    }

    #[tokio::test]
    async fn test_recent_snooze_is_active() {
        let snooze = SnoozeStore::new(MemoryStore::new());
        let snoozed_at = Utc::now() - ChronoDuration::hours(23);
        snooze.record_snooze(snoozed_at).await;

        assert!(snooze.is_snooze_active(Utc::now()).await);
    }

    #[tokio::test]
    async fn test_old_snooze_expires() {
        let snooze = SnoozeStore::new(MemoryStore::new());
        let now = Utc::now();
        snooze.record_snooze(now - ChronoDuration::hours(25)).await;

        assert!(!snooze.is_snooze_active(now).await);
    }

    #[tokio::test]
    async fn test_cooldown_boundary_is_exclusive() {
        let snooze = SnoozeStore::with_cooldown(MemoryStore::new(), Duration::from_millis(1000));
        snooze.record_snooze(at(10_000)).await;

        assert!(snooze.is_snooze_active(at(10_999)).await);
        assert!(!snooze.is_snooze_active(at(11_000)).await);
    }

    #[tokio::test]
    async fn test_record_overwrites_previous() {
        let snooze = SnoozeStore::new(MemoryStore::new());
        snooze.record_snooze(at(1_000)).await;
        snooze.record_snooze(at(5_000)).await;

        assert_eq!(snooze.last_snoozed_at().await, Some(at(5_000)));
        assert_eq!(
            snooze.store().get(SNOOZE_KEY).await.unwrap().as_deref(),
            Some("5000")
        );
    }

    #[tokio::test]
    async fn test_unparseable_record_is_not_snoozed() {
        let store = MemoryStore::new();
        store.set(SNOOZE_KEY, "yesterday").await.unwrap();
        let snooze = SnoozeStore::new(store);

        assert!(!snooze.is_snooze_active(Utc::now()).await);
    }

    #[tokio::test]
    async fn test_storage_failures_are_swallowed() {
        let snooze = SnoozeStore::new(BrokenStore);
        snooze.record_snooze(Utc::now()).await;
        assert!(!snooze.is_snooze_active(Utc::now()).await);
        assert!(snooze.clear().await.is_err());
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let snooze = SnoozeStore::new(MemoryStore::new());
        let now = Utc::now();
        snooze.record_snooze(now).await;
        snooze.clear().await.unwrap();

        assert!(!snooze.is_snooze_active(now).await);
    }
}
