//! In-memory storage backend.
//!
//! Used by tests and as the fail-closed fallback when no durable path is
//! usable. Goes through the same JSON codec and revision check as the file
//! backend so the two are interchangeable behind [`CartStorage`].

use moemen_core::Cart;

use super::{CartStorage, PersistedCart, StorageError, decode_state, encode_state, stored_revision};

/// Cart storage backed by an in-process string.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    raw: Option<String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with raw persisted state, for exercising
    /// legacy and malformed payloads.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    /// The raw persisted document, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedCart>, StorageError> {
        Ok(self.raw.as_deref().and_then(decode_state))
    }

    fn save(&mut self, cart: &Cart, expected_revision: u64) -> Result<u64, StorageError> {
        let stored = self.raw.as_deref().map_or(0, stored_revision);
        if stored != expected_revision && stored != 0 {
            return Err(StorageError::RevisionConflict {
                stored,
                expected: expected_revision,
            });
        }

        let revision = expected_revision + 1;
        self.raw = Some(encode_state(cart, revision));
        Ok(revision)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use moemen_core::{LineItem, Price, ProductId};

    #[test]
    fn test_empty_store_loads_none() {
        assert!(MemoryStorage::new().load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let cart = Cart::from_lines([LineItem {
            product_id: ProductId::new("p1"),
            name: "Tee".to_owned(),
            unit_price: Price::from(50),
            quantity: 1,
            size: "M".to_owned(),
            color: "red".to_owned(),
            image: String::new(),
        }]);

        assert_eq!(storage.save(&cart, 0).unwrap(), 1);
        let persisted = storage.load().unwrap().unwrap();
        assert_eq!(persisted.cart, cart);
        assert_eq!(persisted.revision, 1);
    }

    #[test]
    fn test_seeded_malformed_state_loads_none() {
        let storage = MemoryStorage::with_raw("][");
        assert!(storage.load().unwrap().is_none());
    }
}
