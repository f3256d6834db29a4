//! Memory Handler Module
//!
//! An in-memory backend keeping entries in a mutex-guarded map, with a
//! separate staging map for the deferred-save protocol.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::handler::Handler;
use crate::item::CacheItem;

// == Stored Entry ==
/// The persisted shape of a single cache entry.
#[derive(Debug, Clone)]
struct StoredEntry {
    /// The stored value
    value: Value,
    /// Absolute expiration, None = no expiration
    expiration: Option<DateTime<Utc>>,
}

impl StoredEntry {
    fn from_item(item: &CacheItem) -> Self {
        Self {
            value: item.value().clone(),
            expiration: item.expiration(),
        }
    }

    fn is_expired(&self) -> bool {
        match self.expiration {
            Some(expiration) => Utc::now() > expiration,
            None => false,
        }
    }
}

// == Memory Handler ==
/// An in-memory handler with write-through saves and deferred staging.
///
/// No eviction and no capacity limit; entries live until deleted, cleared
/// or expired. Committing applies every staged entry to the live map.
#[derive(Debug, Default)]
pub struct Memory {
    /// Live key-value storage
    entries: Mutex<HashMap<String, StoredEntry>>,
    /// Entries staged by `save_deferred`, invisible until `commit`
    deferred: Mutex<HashMap<String, StoredEntry>>,
}

impl Memory {
    // == Constructor ==
    /// Creates an empty memory handler.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of live entries, expired ones included.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    // == Is Empty ==
    /// Returns true if no live entries exist.
    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl Handler for Memory {
    fn get_item(&self, key: &str) -> CacheItem {
        match lock(&self.entries).get(key) {
            // The item itself reports expired entries as misses via is_hit
            Some(entry) => CacheItem::restored(key, entry.value.clone(), entry.expiration),
            None => CacheItem::miss(key),
        }
    }

    fn has_item(&self, key: &str) -> bool {
        lock(&self.entries)
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    fn clear(&self) -> bool {
        lock(&self.entries).clear();
        lock(&self.deferred).clear();
        true
    }

    fn delete_item(&self, key: &str) -> bool {
        lock(&self.entries).remove(key);
        true
    }

    fn save(&self, item: &CacheItem) -> bool {
        lock(&self.entries).insert(item.key().to_string(), StoredEntry::from_item(item));
        true
    }

    fn save_deferred(&self, item: &CacheItem) -> bool {
        lock(&self.deferred).insert(item.key().to_string(), StoredEntry::from_item(item));
        true
    }

    fn commit(&self) -> bool {
        // Drain into a local map first; holding both locks at once invites
        // deadlock with other lock orderings.
        let staged: HashMap<String, StoredEntry> = lock(&self.deferred).drain().collect();

        if !staged.is_empty() {
            debug!("committing {} deferred entries", staged.len());
            lock(&self.entries).extend(staged);
        }

        true
    }
}

// == Utility Functions ==
/// Locks a map, recovering from poisoning.
///
/// A map poisoned by a panicking thread is still structurally intact, so
/// keep serving it rather than propagating the panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_memory_starts_empty() {
        let handler = Memory::new();

        assert!(handler.is_empty());
        assert_eq!(handler.len(), 0);
    }

    #[test]
    fn test_save_then_get_round_trip() {
        let handler = Memory::new();
        handler.save(&CacheItem::new("key", json!("value")));

        let item = handler.get_item("key");
        assert!(item.is_hit());
        assert_eq!(item.get(), Some(&json!("value")));
        assert!(handler.has_item("key"));
    }

    #[test]
    fn test_null_value_round_trip() {
        let handler = Memory::new();
        handler.save(&CacheItem::new("key", Value::Null));

        let item = handler.get_item("key");
        assert!(item.is_hit());
        assert_eq!(item.get(), Some(&Value::Null));
    }

    #[test]
    fn test_unknown_key_returns_miss_item() {
        let handler = Memory::new();

        let item = handler.get_item("missing");
        assert_eq!(item.key(), "missing");
        assert!(!item.is_hit());
    }

    #[test]
    fn test_expired_entry_reported_through_item() {
        let handler = Memory::new();
        let mut item = CacheItem::new("key", json!("value"));
        item.expires_at(Some(Utc::now() - Duration::days(1)));
        handler.save(&item);

        // The entry is still stored but no longer counts as present
        assert_eq!(handler.len(), 1);
        assert!(!handler.has_item("key"));
        assert!(!handler.get_item("key").is_hit());
    }

    #[test]
    fn test_save_preserves_expiration() {
        let handler = Memory::new();
        let expiration = Utc::now() + Duration::hours(1);
        let mut item = CacheItem::new("key", json!("value"));
        item.expires_at(Some(expiration));
        handler.save(&item);

        assert_eq!(handler.get_item("key").expiration(), Some(expiration));
    }

    #[test]
    fn test_deferred_entries_invisible_until_commit() {
        let handler = Memory::new();
        handler.save_deferred(&CacheItem::new("key", json!("value")));

        assert!(!handler.has_item("key"));
        assert!(!handler.get_item("key").is_hit());

        assert!(handler.commit());

        assert!(handler.has_item("key"));
        assert_eq!(handler.get_item("key").get(), Some(&json!("value")));
    }

    #[test]
    fn test_commit_drains_staging() {
        let handler = Memory::new();
        handler.save_deferred(&CacheItem::new("one", json!(1)));
        handler.save_deferred(&CacheItem::new("two", json!(2)));
        handler.commit();

        assert_eq!(handler.len(), 2);

        // A second commit has nothing left to apply
        handler.delete_item("one");
        handler.commit();
        assert_eq!(handler.len(), 1);
    }

    #[test]
    fn test_clear_drops_live_and_staged_entries() {
        let handler = Memory::new();
        handler.save(&CacheItem::new("live", json!(1)));
        handler.save_deferred(&CacheItem::new("staged", json!(2)));

        assert!(handler.clear());
        handler.commit();

        assert!(handler.is_empty());
        assert!(!handler.has_item("staged"));
    }

    #[test]
    fn test_delete_missing_key_still_succeeds() {
        let handler = Memory::new();

        assert!(handler.delete_item("missing"));
    }

    #[test]
    fn test_delete_items_removes_each_key() {
        let handler = Memory::new();
        handler.save(&CacheItem::new("one", json!(1)));
        handler.save(&CacheItem::new("two", json!(2)));
        handler.save(&CacheItem::new("three", json!(3)));

        assert!(handler.delete_items(&["one".to_string(), "three".to_string()]));

        assert!(!handler.has_item("one"));
        assert!(handler.has_item("two"));
        assert!(!handler.has_item("three"));
    }

    #[test]
    fn test_save_overwrites_existing_entry() {
        let handler = Memory::new();
        handler.save(&CacheItem::new("key", json!("old")));
        handler.save(&CacheItem::new("key", json!("new")));

        assert_eq!(handler.get_item("key").get(), Some(&json!("new")));
        assert_eq!(handler.len(), 1);
    }
}
