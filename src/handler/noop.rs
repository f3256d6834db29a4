//! Noop Handler Module
//!
//! A backend that never stores anything, standing in for a disabled cache.

use crate::handler::Handler;
use crate::item::CacheItem;

// == Noop Handler ==
/// A handler that always misses and always reports success.
///
/// Useful as the default "caching disabled" backend and as a conformance
/// template for new backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct Noop;

impl Noop {
    /// Creates a new noop handler.
    pub fn new() -> Self {
        Self
    }
}

impl Handler for Noop {
    fn get_item(&self, key: &str) -> CacheItem {
        CacheItem::miss(key)
    }

    fn has_item(&self, _key: &str) -> bool {
        false
    }

    fn clear(&self) -> bool {
        true
    }

    fn delete_item(&self, _key: &str) -> bool {
        true
    }

    fn save(&self, _item: &CacheItem) -> bool {
        true
    }

    fn save_deferred(&self, _item: &CacheItem) -> bool {
        true
    }

    fn commit(&self) -> bool {
        true
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_noop_always_misses() {
        let handler = Noop::new();

        assert!(!handler.get_item("key").is_hit());
        assert!(!handler.has_item("key"));
    }

    #[test]
    fn test_noop_get_items_returns_miss_per_key() {
        let handler = Noop::new();
        let keys = vec!["one".to_string(), "two".to_string()];

        let items = handler.get_items(&keys);

        assert_eq!(items.len(), 2);
        assert!(items.values().all(|item| !item.is_hit()));
        assert_eq!(items["one"].key(), "one");
        assert_eq!(items["two"].key(), "two");
    }

    #[test]
    fn test_noop_save_succeeds_without_persisting() {
        let handler = Noop::new();
        let item = CacheItem::new("key", json!("value"));

        assert!(handler.save(&item));
        assert!(!handler.has_item("key"));
        assert!(!handler.get_item("key").is_hit());
    }

    #[test]
    fn test_noop_mutations_report_success() {
        let handler = Noop::new();
        let item = CacheItem::new("key", json!("value"));

        assert!(handler.clear());
        assert!(handler.delete_item("key"));
        assert!(handler.delete_items(&["one".to_string(), "two".to_string()]));
        assert!(handler.save_deferred(&item));
        assert!(handler.commit());
    }
}
