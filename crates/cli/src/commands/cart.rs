//! Cart management commands.
//!
//! Each command opens the cart store at the configured path, applies one
//! mutation or query, and prints the result. Persistence happens inside
//! the store; a command exits nonzero only on storage or configuration
//! failure.
//!
//! # Environment Variables
//!
//! - `MOEMEN_CART_PATH` - Path of the durable cart file
//! - `MOEMEN_DELIVERY_FEE` - Flat delivery fee in currency units

#![allow(clippy::print_stdout)]

use thiserror::Error;

use moemen_core::{ItemKey, OrderSummary, ProductId, PromoState};
use moemen_storefront::cart::CartStore;
use moemen_storefront::catalog::Catalog;
use moemen_storefront::config::{ConfigError, StorefrontConfig};
use moemen_storefront::error::StorefrontError;
use moemen_storefront::storage::FileStorage;
use moemen_storefront::{pricing, promo};

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The cart store failed to persist a mutation.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// The product id is not in the catalog.
    #[error("No product with id {0} in the catalog")]
    UnknownProduct(ProductId),
}

fn open_store() -> Result<(StorefrontConfig, CartStore<FileStorage>), CartCommandError> {
    let config = StorefrontConfig::from_env()?;
    let store = CartStore::open(FileStorage::new(&config.cart_path));
    Ok((config, store))
}

fn print_lines(store: &CartStore<FileStorage>) {
    if store.cart().is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in store.cart().lines() {
        println!(
            "{:>3} x {} ({}, {}) @ {} = {}",
            line.quantity,
            line.name,
            line.size,
            line.color,
            line.unit_price,
            moemen_core::format_money(line.line_total()),
        );
    }
    println!(
        "{} item(s) across {} line(s)",
        store.cart().total_quantity(),
        store.cart().len()
    );
}

fn print_summary(summary: &OrderSummary) {
    println!("Subtotal:     {}", summary.display_subtotal());
    if !summary.discount_amount.is_zero() {
        println!("Discount:    -{}", summary.display_discount());
    }
    println!("Delivery fee: {}", summary.display_delivery_fee());
    println!("Total:        {}", summary.display_total());
}

/// Print cart contents.
pub fn show() -> Result<(), CartCommandError> {
    let (_, store) = open_store()?;
    print_lines(&store);
    Ok(())
}

/// Add a product variant to the cart.
///
/// Looks the product up in the built-in catalog and snapshots its name,
/// price, and image into the cart line.
pub fn add(product: &str, size: &str, color: &str, quantity: u32) -> Result<(), CartCommandError> {
    let id = ProductId::new(product);
    let product = Catalog::builtin()
        .get(&id)
        .ok_or(CartCommandError::UnknownProduct(id))?;

    let (_, mut store) = open_store()?;
    store.add(product.add_request(size, color, quantity))?;
    print_lines(&store);
    Ok(())
}

/// Replace the quantity of a cart line. Quantities below 1 are ignored.
pub fn update(
    product: &str,
    size: &str,
    color: &str,
    quantity: u32,
) -> Result<(), CartCommandError> {
    let (_, mut store) = open_store()?;
    store.update_quantity(&ItemKey::new(product, size, color), quantity)?;
    print_lines(&store);
    Ok(())
}

/// Delete a cart line. Removing a line that is not there is fine.
pub fn remove(product: &str, size: &str, color: &str) -> Result<(), CartCommandError> {
    let (_, mut store) = open_store()?;
    store.remove(&ItemKey::new(product, size, color))?;
    print_lines(&store);
    Ok(())
}

/// Print the order summary, applying `code` if it is a recognized promo.
pub fn summary(code: Option<&str>) -> Result<(), CartCommandError> {
    let (config, store) = open_store()?;

    let promo_state = match code {
        Some(code) if promo::validate(code).valid => PromoState::applied(code),
        Some(code) => {
            println!("Promo code \"{code}\" is not valid.");
            PromoState::none()
        }
        None => PromoState::none(),
    };

    let summary =
        pricing::calculate_summary_with_fee(store.cart(), &promo_state, config.delivery_fee);
    print_summary(&summary);
    Ok(())
}
