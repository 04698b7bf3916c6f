//! Durable local storage boundary for the cart.
//!
//! The persisted representation is a versioned JSON envelope:
//!
//! ```json
//! { "revision": 3, "savedAt": "2026-08-24T10:00:00Z", "cartItems": [...] }
//! ```
//!
//! where each item keeps the legacy interchange spelling
//! `{ "id", "name", "price", "quantity", "size", "color", "image" }`.
//! A bare JSON array of items (the legacy interchange form) is still
//! accepted on load and reads as revision 0, so pre-migration state keeps
//! working.
//!
//! The revision is a monotonic counter: `save` carries the revision the
//! cart was loaded at and rejects stale writes instead of blindly
//! overwriting a concurrent writer.
//!
//! Malformed state is never an error for the caller: it decodes as "no
//! cart" and the store falls back to empty.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use moemen_core::{Cart, LineItem, Price, PriceError, ProductId};

/// Errors that can occur at the storage boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Another writer persisted a newer cart since this one was loaded.
    #[error("stale cart write: stored revision {stored}, expected {expected}")]
    RevisionConflict {
        /// Revision currently in the store.
        stored: u64,
        /// Revision the writer loaded at.
        expected: u64,
    },
}

/// A cart read back from durable storage, with the revision it carried.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedCart {
    pub cart: Cart,
    pub revision: u64,
}

/// Explicit load/save access to the shared cart store.
///
/// The store is shared across processes (the local-device-storage analog),
/// so `save` takes the revision the caller loaded at and fails with
/// [`StorageError::RevisionConflict`] when it is stale.
pub trait CartStorage {
    /// Read the persisted cart.
    ///
    /// Absent or malformed state yields `Ok(None)`; only an unreadable
    /// store is an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the store exists but cannot be read.
    fn load(&self) -> Result<Option<PersistedCart>, StorageError>;

    /// Replace the persisted cart, returning the new revision.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::RevisionConflict`] if the store holds a
    /// different revision than `expected_revision`, or [`StorageError::Io`]
    /// if the write fails.
    fn save(&mut self, cart: &Cart, expected_revision: u64) -> Result<u64, StorageError>;
}

// =============================================================================
// Wire Format
// =============================================================================

/// Versioned envelope written by `save`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCart {
    revision: u64,
    saved_at: DateTime<Utc>,
    cart_items: Vec<StoredLine>,
}

/// One persisted line item, in the legacy interchange spelling.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLine {
    id: String,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    quantity: u32,
    size: String,
    color: String,
    #[serde(default)]
    image: String,
}

/// Either persisted form; the envelope is tried first.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredState {
    Versioned(StoredCart),
    Legacy(Vec<StoredLine>),
}

impl From<&LineItem> for StoredLine {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.product_id.as_str().to_owned(),
            name: line.name.clone(),
            price: line.unit_price.amount(),
            quantity: line.quantity,
            size: line.size.clone(),
            color: line.color.clone(),
            image: line.image.clone(),
        }
    }
}

impl TryFrom<StoredLine> for LineItem {
    type Error = PriceError;

    fn try_from(stored: StoredLine) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: ProductId::new(stored.id),
            name: stored.name,
            unit_price: Price::new(stored.price)?,
            quantity: stored.quantity,
            size: stored.size,
            color: stored.color,
            image: stored.image,
        })
    }
}

/// Serialize a cart into the versioned envelope at `revision`.
pub(crate) fn encode_state(cart: &Cart, revision: u64) -> String {
    let stored = StoredCart {
        revision,
        saved_at: Utc::now(),
        cart_items: cart.lines().map(StoredLine::from).collect(),
    };
    // StoredCart contains nothing that can fail to serialize.
    serde_json::to_string_pretty(&stored).unwrap_or_else(|_| String::from("[]"))
}

/// Decode persisted state, either envelope or legacy bare array.
///
/// Anything that fails to parse (bad JSON, schema mismatch, a negative
/// price) reads as no cart at all. Duplicate keys and zero quantities in
/// a corrupted store are repaired by [`Cart::from_lines`].
pub(crate) fn decode_state(raw: &str) -> Option<PersistedCart> {
    let state: StoredState = match serde_json::from_str(raw) {
        Ok(state) => state,
        Err(error) => {
            tracing::warn!(%error, "malformed cart state, treating as empty");
            return None;
        }
    };

    let (revision, stored_lines) = match state {
        StoredState::Versioned(stored) => (stored.revision, stored.cart_items),
        StoredState::Legacy(lines) => (0, lines),
    };

    let lines: Result<Vec<LineItem>, PriceError> =
        stored_lines.into_iter().map(LineItem::try_from).collect();
    match lines {
        Ok(lines) => Some(PersistedCart {
            cart: Cart::from_lines(lines),
            revision,
        }),
        Err(error) => {
            tracing::warn!(%error, "invalid cart line in stored state, treating as empty");
            None
        }
    }
}

/// Revision currently carried by raw persisted state.
///
/// Legacy and malformed state both read as revision 0, so a cleared or
/// pre-migration store accepts any write.
pub(crate) fn stored_revision(raw: &str) -> u64 {
    match serde_json::from_str::<StoredState>(raw) {
        Ok(StoredState::Versioned(stored)) => stored.revision,
        Ok(StoredState::Legacy(_)) | Err(_) => 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use moemen_core::ItemKey;

    fn cart_with_one_line() -> Cart {
        Cart::from_lines([LineItem {
            product_id: ProductId::new("p1"),
            name: "Gradient Graphic T-shirt".to_owned(),
            unit_price: Price::from(50),
            quantity: 2,
            size: "M".to_owned(),
            color: "red".to_owned(),
            image: "/products/p1.jpg".to_owned(),
        }])
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let cart = cart_with_one_line();
        let raw = encode_state(&cart, 7);

        let persisted = decode_state(&raw).unwrap();
        assert_eq!(persisted.revision, 7);
        assert_eq!(persisted.cart, cart);
    }

    #[test]
    fn test_decode_legacy_bare_array() {
        // The legacy interchange format: a bare array of items.
        let raw = r#"[
            {"id":"p1","name":"Tee","price":50,"quantity":2,"size":"M","color":"red","image":"/p1.jpg"}
        ]"#;

        let persisted = decode_state(raw).unwrap();
        assert_eq!(persisted.revision, 0);
        let line = persisted.cart.get(&ItemKey::new("p1", "M", "red")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, Price::from(50));
    }

    #[test]
    fn test_decode_malformed_is_none() {
        assert!(decode_state("not json at all").is_none());
        assert!(decode_state(r#"{"revision": "nope"}"#).is_none());
    }

    #[test]
    fn test_decode_negative_price_is_none() {
        let raw = r#"[{"id":"p1","name":"Tee","price":-5,"quantity":1,"size":"M","color":"red","image":""}]"#;
        assert!(decode_state(raw).is_none());
    }

    #[test]
    fn test_decode_coalesces_duplicate_keys() {
        let raw = r#"[
            {"id":"p1","name":"Tee","price":50,"quantity":1,"size":"M","color":"red","image":""},
            {"id":"p1","name":"Tee","price":50,"quantity":3,"size":"M","color":"red","image":""}
        ]"#;

        let persisted = decode_state(raw).unwrap();
        assert_eq!(persisted.cart.len(), 1);
        assert_eq!(persisted.cart.get(&ItemKey::new("p1", "M", "red")).unwrap().quantity, 4);
    }

    #[test]
    fn test_decode_drops_zero_quantity_lines() {
        let raw = r#"[{"id":"p1","name":"Tee","price":50,"quantity":0,"size":"M","color":"red","image":""}]"#;
        let persisted = decode_state(raw).unwrap();
        assert!(persisted.cart.is_empty());
    }

    #[test]
    fn test_stored_revision_of_forms() {
        assert_eq!(stored_revision(&encode_state(&Cart::new(), 9)), 9);
        assert_eq!(stored_revision("[]"), 0);
        assert_eq!(stored_revision("garbage"), 0);
    }

    #[test]
    fn test_encode_writes_interchange_field_names() {
        let raw = encode_state(&cart_with_one_line(), 1);
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let item = &value["cartItems"][0];
        assert_eq!(item["id"], "p1");
        assert_eq!(item["price"], 50.0);
        assert_eq!(item["quantity"], 2);
        assert!(item.get("unit_price").is_none());
    }
}
