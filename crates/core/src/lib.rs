//! Moemen Core - Shared types library.
//!
//! This crate provides common types used across all Moemen Store components:
//! - `storefront` - Cart core library (storage, pricing, promo, catalog)
//! - `cli` - Command-line storefront client
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no persistence,
//! no environment access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, cart line items, promo state, and
//!   catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
