//! Cache Item Module
//!
//! Defines a single cached value with explicit presence tracking and
//! expiration semantics.

use std::any::Any;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::interval::Ttl;

// == Pool Item Capability ==
/// The read surface any pool-compatible item exposes.
///
/// [`CacheItem`] is the only implementation this crate will persist: the pool
/// downcasts through [`PoolItem::as_any`] before handing an item to a
/// handler, so foreign implementations are rejected at the save boundary
/// rather than silently accepted.
pub trait PoolItem {
    /// Returns the key the item was requested under.
    fn key(&self) -> &str;

    /// Returns the stored value if the item is a hit.
    fn get(&self) -> Option<&Value>;

    /// Reports whether the item currently counts as a cache hit.
    fn is_hit(&self) -> bool;

    /// Upcasts for the pool's concrete-type gate.
    fn as_any(&self) -> &dyn Any;
}

// == Cache Item ==
/// A single cached value with expiration semantics.
///
/// Presence is tracked separately from the value itself: an explicit
/// `Value::Null` is a valid cached value and still counts as a hit. An
/// absent expiration means the item never expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheItem {
    /// Immutable key, set at construction
    key: String,
    /// The value slot; only meaningful when `has_value` is set
    value: Value,
    /// True once a value has been explicitly supplied
    has_value: bool,
    /// Absolute expiration, None = never expires
    expiration: Option<DateTime<Utc>>,
}

impl CacheItem {
    // == Constructors ==
    /// Creates an item carrying an explicit value.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
            has_value: true,
            expiration: None,
        }
    }

    /// Creates a miss item with no value.
    ///
    /// This is the shape handlers must return for an unknown key instead of
    /// an absent result.
    pub fn miss(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Value::Null,
            has_value: false,
            expiration: None,
        }
    }

    /// Creates an item restored from persisted state, as a handler does on
    /// a cache hit.
    pub fn restored(
        key: impl Into<String>,
        value: Value,
        expiration: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            key: key.into(),
            value,
            has_value: true,
            expiration,
        }
    }

    // == Key ==
    /// Returns the item key.
    pub fn key(&self) -> &str {
        &self.key
    }

    // == Get ==
    /// Returns the stored value only on a hit, `None` otherwise.
    pub fn get(&self) -> Option<&Value> {
        if self.is_hit() {
            Some(&self.value)
        } else {
            None
        }
    }

    // == Is Hit ==
    /// Reports whether the item counts as a cache hit right now.
    ///
    /// A hit requires a present value and, when an expiration is set, a
    /// current time not strictly after it.
    pub fn is_hit(&self) -> bool {
        if !self.has_value {
            return false;
        }

        match self.expiration {
            Some(expiration) => Utc::now() <= expiration,
            None => true,
        }
    }

    // == Set ==
    /// Stores a value and marks the item as having one.
    ///
    /// Storing `Value::Null` is valid; hit status is governed by presence,
    /// not by the value's own nullability.
    pub fn set(&mut self, value: Value) -> &mut Self {
        self.value = value;
        self.has_value = true;
        self
    }

    // == Expires At ==
    /// Sets the absolute expiration, or clears it with `None`.
    pub fn expires_at(&mut self, expiration: Option<DateTime<Utc>>) -> &mut Self {
        self.expiration = expiration;
        self
    }

    // == Expires After ==
    /// Sets the expiration to now plus the given time-to-live, or clears it
    /// with `None`.
    ///
    /// Accepts raw seconds or a [`crate::interval::CalendarInterval`]; a
    /// structured interval is resolved calendar-aware against the current
    /// instant, so both forms land on the same expiration for the same
    /// effective length.
    pub fn expires_after(&mut self, ttl: Option<impl Into<Ttl>>) -> &mut Self {
        self.expiration = ttl.map(|ttl| {
            let now = Utc::now();
            now + Duration::seconds(ttl.into().to_seconds(now))
        });
        self
    }

    // == Expiration ==
    /// Returns the absolute expiration, if any.
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }

    // == Backend Accessors ==
    /// Returns the raw value slot regardless of hit status.
    ///
    /// Intended for handlers persisting the item; ordinary callers should
    /// prefer [`CacheItem::get`].
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Reports whether a value has been explicitly supplied.
    pub fn has_value(&self) -> bool {
        self.has_value
    }
}

impl PoolItem for CacheItem {
    fn key(&self) -> &str {
        CacheItem::key(self)
    }

    fn get(&self) -> Option<&Value> {
        CacheItem::get(self)
    }

    fn is_hit(&self) -> bool {
        CacheItem::is_hit(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
