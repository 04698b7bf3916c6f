//! Core types for Moemen Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod promo;
pub mod summary;

pub use cart::{AddRequest, Cart, ItemKey, LineItem};
pub use id::*;
pub use price::{Price, PriceError, format_money};
pub use product::{Product, Review};
pub use promo::PromoState;
pub use summary::OrderSummary;
