//! Line-item merge rule.
//!
//! Pure decision logic: an incoming add-request either increments the
//! existing line with the same identity key or appends a new line at the
//! end. Because the cart is keyed on [`ItemKey`], "first match" is the
//! only match: duplicates from a corrupted store are already coalesced
//! when the cart is rebuilt on load.

use moemen_core::{Cart, ItemKey};

/// How an add-request lands in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Increment the quantity of the line at `index` (first-add order).
    Increment { index: usize },
    /// Append a new line at the end of the sequence.
    Append,
}

/// Decide how a request with `key` merges into `cart`.
#[must_use]
pub fn decide(cart: &Cart, key: &ItemKey) -> MergeDecision {
    cart.index_of(key)
        .map_or(MergeDecision::Append, |index| MergeDecision::Increment { index })
}
