//! Error types for the cache pool
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache pool.
///
/// Key validation is the only operation in this crate that raises an error.
/// Every other outcome, including backend failures, is reported as a boolean
/// result so handler diagnostics never leak through the pool boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key contains a character reserved by the key contract
    #[error("Invalid key {key:?}: contains reserved character {found:?}")]
    InvalidKey {
        /// The rejected key, unmodified
        key: String,
        /// The first reserved character found in the key
        found: char,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the cache pool.
pub type Result<T> = std::result::Result<T, CacheError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_message_names_character() {
        let error = CacheError::InvalidKey {
            key: "a{b".to_string(),
            found: '{',
        };

        let message = error.to_string();
        assert!(message.contains("a{b"));
        assert!(message.contains('{'));
    }
}
