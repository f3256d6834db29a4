//! Cache Pool - A generic cache item abstraction layer
//!
//! Provides a cache item with expiration semantics and a key-validating
//! pool that delegates all storage to a pluggable backend handler. The
//! crate is not a storage engine; backends implement the [`Handler`]
//! contract and are injected at pool construction.
//!
//! ```
//! use cache_pool::{CacheItemPool, Memory};
//! use serde_json::json;
//!
//! let pool = CacheItemPool::new(Memory::new());
//!
//! let mut item = pool.get_item("greeting").unwrap();
//! assert!(!item.is_hit());
//!
//! item.set(json!("hello")).expires_after(Some(60i64));
//! assert!(pool.save(&item));
//!
//! assert_eq!(
//!     pool.get_item("greeting").unwrap().get(),
//!     Some(&json!("hello"))
//! );
//! ```

pub mod error;
pub mod handler;
pub mod interval;
pub mod item;
pub mod pool;


// Re-export public types
pub use error::{CacheError, Result};
pub use handler::{Handler, Memory, Noop};
pub use interval::{CalendarInterval, Ttl};
pub use item::{CacheItem, PoolItem};
pub use pool::{CacheItemPool, RESERVED_KEY_CHARACTERS};
