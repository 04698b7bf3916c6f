//! Session-only promo code state.

use serde::{Deserialize, Serialize};

/// Transient record of whether a discount code has been accepted.
///
/// Held only in page-session memory: it is never persisted, and resets to
/// not-applied on every navigation or reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoState {
    /// The code as the user entered it.
    pub code: String,
    /// Whether the code was accepted by the validator.
    pub applied: bool,
}

impl PromoState {
    /// No promo entered or applied.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A promo code that has been accepted.
    #[must_use]
    pub fn applied(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            applied: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_applied() {
        assert!(!PromoState::none().applied);
    }

    #[test]
    fn test_applied_keeps_code() {
        let promo = PromoState::applied("MOEMEN");
        assert!(promo.applied);
        assert_eq!(promo.code, "MOEMEN");
    }
}
