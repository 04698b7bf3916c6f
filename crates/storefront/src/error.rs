//! Unified error handling for the storefront library.
//!
//! Expected conditions (empty or malformed stored state, sub-1 quantity
//! updates, missing keys, invalid promo codes) are handled as values or
//! no-ops and never appear here. What remains is storage failure and
//! configuration failure.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Durable storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorefrontError::from(StorageError::RevisionConflict {
            stored: 2,
            expected: 1,
        });
        assert_eq!(
            err.to_string(),
            "Storage error: stale cart write: stored revision 2, expected 1"
        );
    }
}
