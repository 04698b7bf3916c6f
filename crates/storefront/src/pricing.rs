//! Order summary calculation.
//!
//! Pure and deterministic over `(cart, promo)`: calling it twice with the
//! same inputs yields identical results. Arithmetic is exact decimal;
//! rounding happens only in display formatting.

use rust_decimal::Decimal;

use moemen_core::{Cart, OrderSummary, PromoState};

use crate::promo;

/// Flat delivery fee in currency units.
///
/// Charged unconditionally, including on an empty cart.
#[must_use]
pub fn delivery_fee() -> Decimal {
    Decimal::from(15u32)
}

/// Compute the order summary with the standard delivery fee.
#[must_use]
pub fn calculate_summary(cart: &Cart, promo: &PromoState) -> OrderSummary {
    calculate_summary_with_fee(cart, promo, delivery_fee())
}

/// Compute the order summary with an explicit delivery fee (configuration
/// override path).
#[must_use]
pub fn calculate_summary_with_fee(
    cart: &Cart,
    promo: &PromoState,
    delivery_fee: Decimal,
) -> OrderSummary {
    let subtotal: Decimal = cart.lines().map(moemen_core::LineItem::line_total).sum();
    let discount_rate = if promo.applied {
        promo::promo_rate()
    } else {
        Decimal::ZERO
    };
    let discount_amount = subtotal * discount_rate;

    OrderSummary {
        subtotal,
        discount_rate,
        discount_amount,
        delivery_fee,
        total: subtotal - discount_amount + delivery_fee,
    }
}
