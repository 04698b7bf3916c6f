//! Cart line items and the insertion-ordered cart collection.
//!
//! A cart holds at most one [`LineItem`] per [`ItemKey`] (the
//! product/size/color triple). The invariant is enforced mechanically by
//! keying the collection on `ItemKey` rather than relying on callers to
//! scan for duplicates.

use core::fmt;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// The identity key of a cart line: two add-requests with the same key
/// refer to the same line and combine quantities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl ItemKey {
    /// Create a new identity key.
    #[must_use]
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.product_id, self.size, self.color)
    }
}

/// One row in the cart: a specific product variant and quantity.
///
/// Display metadata (`name`, `image`) and `unit_price` are snapshotted at
/// add time and never re-fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    /// Never persisted or rendered below 1.
    pub quantity: u32,
    pub size: String,
    pub color: String,
    pub image: String,
}

impl LineItem {
    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> ItemKey {
        ItemKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Full-precision `unit_price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.line_total(self.quantity)
    }
}

/// An add-to-cart request produced by a product-detail interaction.
///
/// Carries the snapshot of display metadata and unit price that becomes a
/// [`LineItem`] if no line with the same key exists yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRequest {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub size: String,
    pub color: String,
    pub image: String,
}

impl AddRequest {
    /// The identity key this request merges on.
    #[must_use]
    pub fn key(&self) -> ItemKey {
        ItemKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }
}

impl From<AddRequest> for LineItem {
    fn from(request: AddRequest) -> Self {
        Self {
            product_id: request.product_id,
            name: request.name,
            unit_price: request.unit_price,
            quantity: request.quantity,
            size: request.size,
            color: request.color,
            image: request.image,
        }
    }
}

/// Insertion-ordered collection of line items, at most one per [`ItemKey`].
///
/// Order is the order of first add. There is no item limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: IndexMap<ItemKey, LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from a sequence of line items, restoring first-seen
    /// order.
    ///
    /// A well-formed store never contains two lines with the same key, but
    /// a corrupted one might: duplicates are coalesced into the first
    /// occurrence by summing quantities. Lines with a zero quantity are
    /// dropped.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            cart.append(line);
        }
        cart
    }

    /// Line items in first-add order.
    pub fn lines(&self) -> impl Iterator<Item = &LineItem> {
        self.items.values()
    }

    /// Look up the line for an identity key.
    #[must_use]
    pub fn get(&self, key: &ItemKey) -> Option<&LineItem> {
        self.items.get(key)
    }

    /// Whether a line exists for this key.
    #[must_use]
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.items.contains_key(key)
    }

    /// Position of the line for this key in first-add order.
    #[must_use]
    pub fn index_of(&self, key: &ItemKey) -> Option<usize> {
        self.items.get_index_of(key)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines (the cart-count badge value).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.values().map(|line| u64::from(line.quantity)).sum()
    }

    /// Increment the quantity of the line for `key` by `by`.
    ///
    /// Returns `false` (and changes nothing) if no line matches.
    pub fn increment(&mut self, key: &ItemKey, by: u32) -> bool {
        match self.items.get_mut(key) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(by);
                true
            }
            None => false,
        }
    }

    /// Append a line at the end of the sequence.
    ///
    /// If a line with the same key already exists the quantities are
    /// combined instead, keeping the one-line-per-key invariant intact.
    pub fn append(&mut self, line: LineItem) {
        let key = line.key();
        if self.increment(&key, line.quantity) {
            return;
        }
        self.items.insert(key, line);
    }

    /// Replace the quantity of the line for `key`.
    ///
    /// A `quantity` below 1 is a no-op: deletion must go through
    /// [`Cart::remove`], never through a sub-1 quantity. Returns whether
    /// the cart changed.
    pub fn set_quantity(&mut self, key: &ItemKey, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.items.get_mut(key) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Delete the line for `key`, preserving the order of the remaining
    /// lines. Removing a missing key returns `None`.
    pub fn remove(&mut self, key: &ItemKey) -> Option<LineItem> {
        self.items.shift_remove(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, size: &str, color: &str, price: u32, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price: Price::from(price),
            quantity,
            size: size.to_owned(),
            color: color.to_owned(),
            image: format!("/products/{id}.jpg"),
        }
    }

    #[test]
    fn test_append_merges_same_key() {
        let mut cart = Cart::new();
        cart.append(line("p1", "M", "red", 50, 1));
        cart.append(line("p1", "M", "red", 50, 2));

        assert_eq!(cart.len(), 1);
        let key = ItemKey::new("p1", "M", "red");
        assert_eq!(cart.get(&key).unwrap().quantity, 3);
    }

    #[test]
    fn test_append_preserves_first_seen_order() {
        let mut cart = Cart::new();
        cart.append(line("p2", "L", "blue", 30, 1));
        cart.append(line("p1", "M", "red", 50, 1));
        cart.append(line("p2", "L", "blue", 30, 1));

        let ids: Vec<&str> = cart.lines().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);
    }

    #[test]
    fn test_distinct_keys_stay_distinct() {
        let mut cart = Cart::new();
        cart.append(line("p1", "M", "red", 50, 1));
        cart.append(line("p1", "L", "red", 50, 1));
        cart.append(line("p1", "M", "blue", 50, 1));

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_set_quantity_below_one_is_noop() {
        let mut cart = Cart::new();
        cart.append(line("p1", "M", "red", 50, 4));
        let key = ItemKey::new("p1", "M", "red");

        assert!(!cart.set_quantity(&key, 0));
        assert_eq!(cart.get(&key).unwrap().quantity, 4);
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = Cart::new();
        cart.append(line("p1", "M", "red", 50, 4));
        let key = ItemKey::new("p1", "M", "red");

        assert!(cart.set_quantity(&key, 2));
        assert_eq!(cart.get(&key).unwrap().quantity, 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.append(line("p1", "M", "red", 50, 1));
        let key = ItemKey::new("p1", "M", "red");

        assert!(cart.remove(&key).is_some());
        assert!(cart.remove(&key).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let mut cart = Cart::new();
        cart.append(line("p1", "M", "red", 50, 1));
        cart.append(line("p2", "L", "blue", 30, 1));
        cart.append(line("p3", "S", "green", 20, 1));

        cart.remove(&ItemKey::new("p2", "L", "blue"));
        let ids: Vec<&str> = cart.lines().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["p1", "p3"]);
    }

    #[test]
    fn test_from_lines_coalesces_duplicates() {
        // A corrupted store can contain duplicate keys; rebuilding the cart
        // sums them into the first occurrence.
        let cart = Cart::from_lines([
            line("p1", "M", "red", 50, 1),
            line("p2", "L", "blue", 30, 2),
            line("p1", "M", "red", 50, 3),
        ]);

        assert_eq!(cart.len(), 2);
        let ids: Vec<&str> = cart.lines().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2"]);
        assert_eq!(cart.get(&ItemKey::new("p1", "M", "red")).unwrap().quantity, 4);
    }

    #[test]
    fn test_from_lines_drops_zero_quantity() {
        let cart = Cart::from_lines([line("p1", "M", "red", 50, 0)]);
        assert!(cart.is_empty());
    }
}
