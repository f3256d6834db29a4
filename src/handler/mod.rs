//! Handler Module
//!
//! The storage backend contract consumed by the pool, plus the bundled
//! reference backends.

mod memory;
mod noop;

// Re-export public types
pub use memory::Memory;
pub use noop::Noop;

use std::collections::HashMap;

use crate::item::CacheItem;

// == Handler Contract ==
/// The contract a storage backend satisfies to serve a pool.
///
/// Failure is reported through boolean results; no errors cross this
/// boundary. Implementations own their interior mutability and locking —
/// the pool never mutates a handler and makes no concurrency promises of
/// its own. The atomicity of the deferred-save protocol
/// ([`Handler::save_deferred`] plus [`Handler::commit`]) is likewise
/// backend-defined.
pub trait Handler {
    /// Returns an item for the key.
    ///
    /// Must always produce a concrete item, building
    /// [`CacheItem::miss`] when the key is unknown rather than returning an
    /// absent result.
    fn get_item(&self, key: &str) -> CacheItem;

    /// Returns one item per requested key, with the same per-key guarantee
    /// as [`Handler::get_item`].
    fn get_items(&self, keys: &[String]) -> HashMap<String, CacheItem> {
        keys.iter()
            .map(|key| (key.clone(), self.get_item(key)))
            .collect()
    }

    /// Confirms whether the key is present.
    ///
    /// May skip retrieving the value for performance, which can race with a
    /// later read; freshness-critical callers should check an item's
    /// [`CacheItem::is_hit`] instead.
    fn has_item(&self, key: &str) -> bool;

    /// Deletes all entries.
    fn clear(&self) -> bool;

    /// Removes the entry for the key; a missing key is not a failure.
    fn delete_item(&self, key: &str) -> bool;

    /// Removes the entries for all given keys, attempting every key even
    /// after a failure.
    fn delete_items(&self, keys: &[String]) -> bool {
        keys.iter()
            .fold(true, |ok, key| self.delete_item(key) && ok)
    }

    /// Persists the item's key, value and expiration immediately.
    fn save(&self, item: &CacheItem) -> bool;

    /// Stages the item for persistence on the next [`Handler::commit`].
    fn save_deferred(&self, item: &CacheItem) -> bool;

    /// Flushes all staged deferred items; returns overall success.
    fn commit(&self) -> bool;
}
