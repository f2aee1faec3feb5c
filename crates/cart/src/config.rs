//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `URITHI_STORAGE_DIR` - Directory for file-backed storage (default: `.urithi`)
//! - `URITHI_CART_KEY` - Storage key for cart lines (default: `urithi_cart`)
//! - `URITHI_SESSION_KEY` - Storage key for the session id (default: `urithi_session_id`)
//! - `URITHI_FREE_SHIPPING_THRESHOLD` - Subtotal that ships free (default: 10000)
//! - `URITHI_SHIPPING_FEE` - Flat shipping fee below the threshold (default: 500)
//! - `URITHI_CURRENCY` - ISO 4217 code used for display (default: KES)

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

use urithi_core::CurrencyCode;

use crate::storage::{DEFAULT_CART_KEY, DEFAULT_SESSION_KEY, StorageKeys};
use crate::summary::{DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_FEE, ShippingPolicy};

const DEFAULT_STORAGE_DIR: &str = ".urithi";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for `FileStorage`
    pub storage_dir: PathBuf,
    /// Keys for cart lines and session id
    pub keys: StorageKeys,
    /// Shipping rules for order summaries
    pub shipping: ShippingPolicy,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            keys: StorageKeys::default(),
            shipping: ShippingPolicy::default(),
            currency: CurrencyCode::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let storage_dir = PathBuf::from(get_or_default("URITHI_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        let keys = StorageKeys {
            cart: get_or_default("URITHI_CART_KEY", DEFAULT_CART_KEY),
            session: get_or_default("URITHI_SESSION_KEY", DEFAULT_SESSION_KEY),
        };
        if keys.cart == keys.session {
            return Err(ConfigError::InvalidEnvVar(
                "URITHI_SESSION_KEY".to_string(),
                "must differ from URITHI_CART_KEY".to_string(),
            ));
        }

        let shipping = ShippingPolicy {
            free_shipping_threshold: parse_amount(
                "URITHI_FREE_SHIPPING_THRESHOLD",
                &get_or_default(
                    "URITHI_FREE_SHIPPING_THRESHOLD",
                    &DEFAULT_FREE_SHIPPING_THRESHOLD.to_string(),
                ),
            )?,
            flat_rate: parse_amount(
                "URITHI_SHIPPING_FEE",
                &get_or_default("URITHI_SHIPPING_FEE", &DEFAULT_SHIPPING_FEE.to_string()),
            )?,
        };

        let currency = get_or_default("URITHI_CURRENCY", CurrencyCode::default().code())
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("URITHI_CURRENCY".to_string(), e.to_string()))?;

        Ok(Self {
            storage_dir,
            keys,
            shipping,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a non-negative decimal amount.
fn parse_amount(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    let amount = value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not be negative (got {amount})"),
        ));
    }
    Ok(amount)
}
