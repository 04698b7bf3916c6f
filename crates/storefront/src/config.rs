//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MOEMEN_CART_PATH` - Path of the durable cart file (default: cartItems.json)
//! - `MOEMEN_DELIVERY_FEE` - Flat delivery fee in currency units (default: 15)

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Path of the durable cart file
    pub cart_path: PathBuf,
    /// Flat delivery fee in currency units
    pub delivery_fee: Decimal,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Every
    /// variable is optional; absent values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let cart_path =
            PathBuf::from(get_env_or_default("MOEMEN_CART_PATH", "cartItems.json"));
        let delivery_fee = match get_optional_env("MOEMEN_DELIVERY_FEE") {
            Some(raw) => parse_fee("MOEMEN_DELIVERY_FEE", &raw)?,
            None => pricing::delivery_fee(),
        };

        Ok(Self {
            cart_path,
            delivery_fee,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_path: PathBuf::from("cartItems.json"),
            delivery_fee: pricing::delivery_fee(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a delivery fee value, rejecting negatives.
fn parse_fee(var_name: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let fee: Decimal = raw
        .trim()
        .parse()
        .map_err(|e: rust_decimal::Error| {
            ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string())
        })?;
    if fee.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must not be negative (got {fee})"),
        ));
    }
    Ok(fee)
}
