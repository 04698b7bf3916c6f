//! The product catalog.
//!
//! A read-only collection of products and reviews, embedded at build time.
//! From the cart's point of view the catalog is only the place an
//! [`AddRequest`](moemen_core::AddRequest) snapshot comes from; once an
//! item is in the cart the catalog is never consulted again.

use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use moemen_core::{Product, ProductId, Review};

/// Catalog data embedded at build time.
const BUILTIN_JSON: &str = include_str!("products.json");

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    match Catalog::from_json(BUILTIN_JSON) {
        Ok(catalog) => {
            info!(products = catalog.products.len(), "catalog loaded");
            catalog
        }
        Err(err) => {
            error!(%err, "embedded catalog data is malformed, serving empty catalog");
            Catalog::default()
        }
    }
});

/// Errors that can occur when loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document is not valid JSON or does not match the schema.
    #[error("Malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A read-only product catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
    reviews: Vec<Review>,
}

impl Catalog {
    /// The catalog embedded in the binary.
    ///
    /// Parsed once on first access. Malformed embedded data yields an empty
    /// catalog rather than a panic.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] if `json` is not a valid catalog
    /// document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in `category`, in catalog order.
    ///
    /// Returned items borrow from the catalog, not from `category`.
    pub fn by_category<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Up to `limit` other products from the same category, in catalog
    /// order. The product itself is excluded.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.by_category(&product.category)
            .filter(|p| p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Customer reviews shown on product pages.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }
}
