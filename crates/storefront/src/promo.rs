//! Promo code validation.
//!
//! A single recognized code, compared case-insensitively. Invalidity is a
//! result value, never a fault: the caller decides how to surface it.

use rust_decimal::Decimal;

/// The one recognized promo code.
pub const PROMO_CODE: &str = "MOEMEN";

/// Outcome of checking a user-entered promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoCheck {
    /// Whether the code was recognized.
    pub valid: bool,
    /// Discount rate granted; 0 for unrecognized codes.
    pub rate: Decimal,
}

/// The discount rate granted by the recognized code (20%).
#[must_use]
pub fn promo_rate() -> Decimal {
    Decimal::new(20, 2)
}

/// Check a user-entered code against the recognized promo code.
#[must_use]
pub fn validate(code: &str) -> PromoCheck {
    if code.eq_ignore_ascii_case(PROMO_CODE) {
        PromoCheck {
            valid: true,
            rate: promo_rate(),
        }
    } else {
        PromoCheck {
            valid: false,
            rate: Decimal::ZERO,
        }
    }
}
