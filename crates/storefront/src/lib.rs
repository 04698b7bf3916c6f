//! Moemen Storefront library.
//!
//! The stateful core of the storefront: the cart store with its durable
//! local persistence, the pure merge/pricing/promo logic it applies, the
//! built-in catalog the UI reads from, and the cart-updated notification
//! hub other views subscribe to.
//!
//! Page rendering, navigation chrome, and checkout flow are collaborators
//! that call into this crate; none of them live here.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod pricing;
pub mod promo;
pub mod storage;
