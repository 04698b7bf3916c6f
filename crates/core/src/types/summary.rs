//! Derived order summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::format_money;

/// Derived pricing breakdown computed on demand from the cart and promo
/// state. Never stored or cached: every read recomputes it.
///
/// All amounts are full precision; use the `display_*` accessors when
/// rendering, which round to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Σ `unit_price × quantity` over all lines; 0 for an empty cart.
    pub subtotal: Decimal,
    /// 0.20 when a promo is applied, otherwise 0.
    pub discount_rate: Decimal,
    /// `subtotal × discount_rate`.
    pub discount_amount: Decimal,
    /// Flat fee, charged even on an empty cart.
    pub delivery_fee: Decimal,
    /// `subtotal − discount_amount + delivery_fee`.
    pub total: Decimal,
}

impl OrderSummary {
    /// Subtotal formatted for display.
    #[must_use]
    pub fn display_subtotal(&self) -> String {
        format_money(self.subtotal)
    }

    /// Discount amount formatted for display.
    #[must_use]
    pub fn display_discount(&self) -> String {
        format_money(self.discount_amount)
    }

    /// Delivery fee formatted for display.
    #[must_use]
    pub fn display_delivery_fee(&self) -> String {
        format_money(self.delivery_fee)
    }

    /// Grand total formatted for display.
    #[must_use]
    pub fn display_total(&self) -> String {
        format_money(self.total)
    }
}
