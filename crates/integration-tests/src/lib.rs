//! Integration tests for Moemen Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p moemen-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_lifecycle` - Persistence round-trips, migration, concurrent writers
//! - `order_summary` - End-to-end pricing and promo scenarios
//!
//! The harness below gives each test its own temporary cart file so tests
//! never share durable state.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use tempfile::TempDir;

use moemen_storefront::cart::CartStore;
use moemen_storefront::storage::FileStorage;

/// A per-test sandbox holding the durable cart file.
///
/// The temporary directory lives as long as the context; dropping it
/// deletes the file.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a fresh sandbox with no persisted cart.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Path of the cart file inside the sandbox.
    #[must_use]
    pub fn cart_path(&self) -> PathBuf {
        self.dir.path().join("cartItems.json")
    }

    /// Open a cart store over the sandbox's cart file.
    ///
    /// Can be called repeatedly to model separate page loads or tabs
    /// sharing one durable store.
    #[must_use]
    pub fn open_store(&self) -> CartStore<FileStorage> {
        CartStore::open(FileStorage::new(self.cart_path()))
    }

    /// Seed the durable cart file with raw JSON, bypassing the store.
    pub fn write_raw(&self, raw: &str) {
        std::fs::write(self.cart_path(), raw).unwrap();
    }

    /// Read the durable cart file as raw JSON.
    #[must_use]
    pub fn read_raw(&self) -> String {
        std::fs::read_to_string(self.cart_path()).unwrap()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
