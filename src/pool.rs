//! Cache Item Pool Module
//!
//! The public entry point: validates keys and delegates every operation to
//! an injected storage handler.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{CacheError, Result};
use crate::handler::Handler;
use crate::item::{CacheItem, PoolItem};

// == Public Constants ==
/// Characters no key may contain, mirroring constraints common backend wire
/// protocols impose on key naming.
pub const RESERVED_KEY_CHARACTERS: &[char] = &['{', '}', '(', ')', '/', '\\', '@', ':'];

// == Cache Item Pool ==
/// A validating façade over a single storage handler.
///
/// The handler is injected at construction and owned for the pool's whole
/// lifetime; the pool holds no other state and never batches, retries or
/// reinterprets handler results.
#[derive(Debug)]
pub struct CacheItemPool<H: Handler> {
    /// The storage backend all operations delegate to
    handler: H,
}

impl<H: Handler> CacheItemPool<H> {
    // == Constructor ==
    /// Creates a pool over the given handler.
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    // == Get Item ==
    /// Returns the item for the key; a miss item when the backend has none.
    pub fn get_item(&self, key: &str) -> Result<CacheItem> {
        Ok(self.handler.get_item(validate_key(key)?))
    }

    // == Get Items ==
    /// Returns one item per requested key.
    ///
    /// Every key is validated before the handler sees any of them.
    pub fn get_items(&self, keys: &[String]) -> Result<HashMap<String, CacheItem>> {
        for key in keys {
            validate_key(key)?;
        }

        Ok(self.handler.get_items(keys))
    }

    // == Has Item ==
    /// Confirms whether the backend holds the key.
    pub fn has_item(&self, key: &str) -> Result<bool> {
        Ok(self.handler.has_item(validate_key(key)?))
    }

    // == Clear ==
    /// Deletes all entries; no key validation involved.
    pub fn clear(&self) -> bool {
        self.handler.clear()
    }

    // == Delete Item ==
    /// Removes the entry for the key.
    pub fn delete_item(&self, key: &str) -> Result<bool> {
        Ok(self.handler.delete_item(validate_key(key)?))
    }

    // == Delete Items ==
    /// Removes the entries for all given keys, validating each key first.
    pub fn delete_items(&self, keys: &[String]) -> Result<bool> {
        for key in keys {
            validate_key(key)?;
        }

        Ok(self.handler.delete_items(keys))
    }

    // == Save ==
    /// Persists the item immediately.
    ///
    /// Only items of this crate's concrete [`CacheItem`] type are accepted;
    /// a foreign [`PoolItem`] implementation makes the call return false
    /// without reaching the handler.
    pub fn save(&self, item: &dyn PoolItem) -> bool {
        match item.as_any().downcast_ref::<CacheItem>() {
            Some(item) => self.handler.save(item),
            None => {
                warn!(key = item.key(), "rejecting save of foreign item type");
                false
            }
        }
    }

    // == Save Deferred ==
    /// Stages the item for the next [`CacheItemPool::commit`], with the
    /// same type gate as [`CacheItemPool::save`].
    pub fn save_deferred(&self, item: &dyn PoolItem) -> bool {
        match item.as_any().downcast_ref::<CacheItem>() {
            Some(item) => self.handler.save_deferred(item),
            None => {
                warn!(key = item.key(), "rejecting deferred save of foreign item type");
                false
            }
        }
    }

    // == Commit ==
    /// Flushes the handler's staged deferred items.
    pub fn commit(&self) -> bool {
        self.handler.commit()
    }
}

// == Key Validation ==
/// Validates a cache key, returning it unchanged on success.
///
/// No normalization is applied; case and whitespace are preserved.
pub(crate) fn validate_key(key: &str) -> Result<&str> {
    match key.chars().find(|c| RESERVED_KEY_CHARACTERS.contains(c)) {
        Some(found) => Err(CacheError::InvalidKey {
            key: key.to_string(),
            found,
        }),
        None => Ok(key),
    }
}
