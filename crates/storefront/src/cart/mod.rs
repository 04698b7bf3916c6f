//! The cart store: single source of truth for cart contents.
//!
//! Owns the in-memory [`Cart`], applies the merge rule on add, persists
//! through a [`CartStorage`] backend after every mutation, and emits a
//! cart-updated notification once the write lands.
//!
//! Opening never fails: absent, malformed, or unreadable persisted state
//! all yield an empty cart. Mutations can fail only at the storage
//! boundary (I/O, or a revision conflict when another writer got there
//! first); on conflict the in-memory cart keeps the unpersisted change
//! and the caller should [`CartStore::reload`].

pub mod merge;

use tracing::{debug, warn};

use moemen_core::{AddRequest, Cart, ItemKey, OrderSummary, PromoState};

use crate::error::Result;
use crate::events::{CartChange, CartEvents};
use crate::pricing;
use crate::storage::CartStorage;

use merge::MergeDecision;

/// Cart contents plus durable persistence and change notification.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
    cart: Cart,
    revision: u64,
    events: CartEvents,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the store, rehydrating the cart from persisted state.
    ///
    /// Fails open: absent, malformed, or unreadable state yields an empty
    /// cart rather than an error. Safe and idempotent to call on every
    /// page mount.
    pub fn open(storage: S) -> Self {
        let (cart, revision) = Self::read(&storage);
        Self {
            storage,
            cart,
            revision,
            events: CartEvents::new(),
        }
    }

    fn read(storage: &S) -> (Cart, u64) {
        match storage.load() {
            Ok(Some(persisted)) => (persisted.cart, persisted.revision),
            Ok(None) => (Cart::new(), 0),
            Err(error) => {
                warn!(%error, "cart storage unreadable, starting with empty cart");
                (Cart::new(), 0)
            }
        }
    }

    /// The current cart contents.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Revision the in-memory cart was last synchronized at.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The notification hub other views subscribe to.
    #[must_use]
    pub fn events(&self) -> &CartEvents {
        &self.events
    }

    /// Re-read persisted state, replacing the in-memory cart.
    ///
    /// Consumers that care about writes from other tabs re-load instead of
    /// trusting a cached copy.
    pub fn reload(&mut self) {
        let (cart, revision) = Self::read(&self.storage);
        self.cart = cart;
        self.revision = revision;
    }

    /// Add an item to the cart.
    ///
    /// A line with the same identity key has its quantity incremented (no
    /// upper bound); otherwise the item is appended at the end. A request
    /// with quantity 0 is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting the updated cart fails.
    pub fn add(&mut self, request: AddRequest) -> Result<&Cart> {
        if request.quantity == 0 {
            debug!(key = %request.key(), "ignoring add with zero quantity");
            return Ok(&self.cart);
        }

        match merge::decide(&self.cart, &request.key()) {
            MergeDecision::Increment { .. } => {
                self.cart.increment(&request.key(), request.quantity);
            }
            MergeDecision::Append => self.cart.append(request.into()),
        }
        self.persist()?;
        Ok(&self.cart)
    }

    /// Replace the quantity of the line for `key`.
    ///
    /// A quantity below 1 is a no-op (deletion goes through
    /// [`CartStore::remove`], never through a sub-1 quantity), as is a key
    /// with no matching line.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting the updated cart fails.
    pub fn update_quantity(&mut self, key: &ItemKey, quantity: u32) -> Result<&Cart> {
        if quantity < 1 {
            debug!(%key, quantity, "ignoring quantity update below 1");
            return Ok(&self.cart);
        }
        if !self.cart.set_quantity(key, quantity) {
            debug!(%key, "quantity update for absent line ignored");
            return Ok(&self.cart);
        }
        self.persist()?;
        Ok(&self.cart)
    }

    /// Delete the line for `key`. Removing a missing key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting the updated cart fails.
    pub fn remove(&mut self, key: &ItemKey) -> Result<&Cart> {
        if self.cart.remove(key).is_some() {
            self.persist()?;
        }
        Ok(&self.cart)
    }

    /// Compute the order summary for the current cart and promo state.
    ///
    /// Derived on every call, never cached.
    #[must_use]
    pub fn summary(&self, promo: &PromoState) -> OrderSummary {
        pricing::calculate_summary(&self.cart, promo)
    }

    /// Persist the cart and notify subscribers. Runs after every mutation;
    /// there is no write buffering or batching.
    fn persist(&mut self) -> Result<()> {
        self.revision = self.storage.save(&self.cart, self.revision)?;
        self.events.emit(&CartChange {
            item_count: self.cart.total_quantity(),
            line_count: self.cart.len(),
            revision: self.revision,
        });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use moemen_core::Price;

    use crate::storage::MemoryStorage;

    fn request(id: &str, size: &str, color: &str, price: u32, quantity: u32) -> AddRequest {
        AddRequest {
            product_id: id.into(),
            name: format!("Product {id}"),
            unit_price: Price::from(price),
            quantity,
            size: size.to_owned(),
            color: color.to_owned(),
            image: format!("/products/{id}.jpg"),
        }
    }

    #[test]
    fn test_open_empty_storage() {
        let store = CartStore::open(MemoryStorage::new());
        assert!(store.cart().is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_open_malformed_storage_fails_open() {
        let store = CartStore::open(MemoryStorage::with_raw("not json"));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_add_same_key_sums_quantities() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(request("p1", "M", "red", 50, 1)).unwrap();
        store.add(request("p1", "M", "red", 50, 1)).unwrap();

        let cart = store.cart();
        assert_eq!(cart.len(), 1);
        let key = ItemKey::new("p1", "M", "red");
        assert_eq!(cart.get(&key).unwrap().quantity, 2);
        assert_eq!(store.summary(&PromoState::none()).subtotal, 100u32.into());
    }

    #[test]
    fn test_add_distinct_keys_in_first_seen_order() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(request("p2", "L", "blue", 30, 1)).unwrap();
        store.add(request("p1", "M", "red", 50, 1)).unwrap();
        store.add(request("p1", "L", "red", 50, 1)).unwrap();

        let ids: Vec<String> = store
            .cart()
            .lines()
            .map(|l| format!("{}/{}", l.product_id, l.size))
            .collect();
        assert_eq!(ids, ["p2/L", "p1/M", "p1/L"]);
    }

    #[test]
    fn test_add_zero_quantity_is_noop_and_does_not_persist() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(request("p1", "M", "red", 50, 0)).unwrap();
        assert!(store.cart().is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_update_quantity_below_one_is_noop() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(request("p1", "M", "red", 50, 4)).unwrap();
        let key = ItemKey::new("p1", "M", "red");

        store.update_quantity(&key, 0).unwrap();
        assert_eq!(store.cart().get(&key).unwrap().quantity, 4);
    }

    #[test]
    fn test_update_quantity_replaces_and_persists() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(request("p1", "M", "red", 50, 4)).unwrap();
        let key = ItemKey::new("p1", "M", "red");

        let before = store.revision();
        store.update_quantity(&key, 2).unwrap();
        assert_eq!(store.cart().get(&key).unwrap().quantity, 2);
        assert_eq!(store.revision(), before + 1);
    }

    #[test]
    fn test_remove_twice_is_idempotent() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(request("p1", "M", "red", 50, 1)).unwrap();
        let key = ItemKey::new("p1", "M", "red");

        store.remove(&key).unwrap();
        let after_first = store.revision();
        store.remove(&key).unwrap();
        assert!(store.cart().is_empty());
        assert_eq!(store.revision(), after_first);
    }

    #[test]
    fn test_every_mutation_emits_change() {
        let mut store = CartStore::open(MemoryStorage::new());
        let emitted = Arc::new(AtomicU64::new(0));
        let last_count = Arc::new(AtomicU64::new(0));
        {
            let emitted = Arc::clone(&emitted);
            let last_count = Arc::clone(&last_count);
            store.events().subscribe(move |change| {
                emitted.fetch_add(1, Ordering::SeqCst);
                last_count.store(change.item_count, Ordering::SeqCst);
            });
        }

        store.add(request("p1", "M", "red", 50, 2)).unwrap();
        store.add(request("p2", "L", "blue", 30, 1)).unwrap();
        store.remove(&ItemKey::new("p2", "L", "blue")).unwrap();

        assert_eq!(emitted.load(Ordering::SeqCst), 3);
        assert_eq!(last_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_summary_scenario_promo_applied() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(request("p1", "M", "red", 50, 2)).unwrap();

        let summary = store.summary(&PromoState::applied("MOEMEN"));
        assert_eq!(summary.display_subtotal(), "$100.00");
        assert_eq!(summary.display_discount(), "$20.00");
        assert_eq!(summary.display_delivery_fee(), "$15.00");
        assert_eq!(summary.display_total(), "$95.00");
    }
}
