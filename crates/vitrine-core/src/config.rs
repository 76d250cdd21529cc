//! Environment-driven configuration.
//!
//! Every tunable the storefront logic uses lives here as a named value
//! instead of an inline literal: tax rate, poll cadence, quantity cap,
//! backend endpoint. Values come from `VITRINE_*` environment variables
//! with sensible defaults; only the parsing is fallible.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable was set to an unparsable value.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the storefront backend REST API.
    pub api_base_url: String,
    /// Per-request timeout for backend calls, in seconds.
    pub request_timeout_secs: u64,
    /// ISO 4217 currency code sent with order creation.
    pub currency: String,
    /// Tax rate applied on top of the cart subtotal.
    pub tax_rate: Decimal,
    /// Delay between order-status polls after payment.
    pub poll_interval_ms: u64,
    /// Upper bound for any single cart line's quantity.
    pub max_quantity: u32,
    /// Path of the JSON file holding the persisted cart.
    pub cart_path: PathBuf,
}

/// Load configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns [`ConfigError`] if a value is set but invalid.
pub fn load_config() -> Result<StoreConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns [`ConfigError`] if a value is set but invalid.
pub fn load_config_from_env() -> Result<StoreConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_config<F>(lookup: F) -> Result<StoreConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| lookup(var).unwrap_or_else(|_| default.to_string());

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_decimal = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        or_default(var, default)
            .parse::<Decimal>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_base_url = or_default("VITRINE_API_BASE_URL", "http://localhost:8080/api");
    let request_timeout_secs = parse_u64("VITRINE_REQUEST_TIMEOUT_SECS", "10")?;
    let currency = or_default("VITRINE_CURRENCY", "EUR");
    let tax_rate = parse_decimal("VITRINE_TAX_RATE", "0.20")?;
    let poll_interval_ms = parse_u64("VITRINE_POLL_INTERVAL_MS", "3000")?;
    let max_quantity = parse_u32("VITRINE_MAX_QUANTITY", "99")?;
    let cart_path = PathBuf::from(or_default("VITRINE_CART_PATH", "./cart.json"));

    if tax_rate < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar {
            var: "VITRINE_TAX_RATE".to_string(),
            reason: "tax rate must not be negative".to_string(),
        });
    }
    if max_quantity == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VITRINE_MAX_QUANTITY".to_string(),
            reason: "max quantity must be at least 1".to_string(),
        });
    }

    Ok(StoreConfig {
        api_base_url,
        request_timeout_secs,
        currency,
        tax_rate,
        poll_interval_ms,
        max_quantity,
        cart_path,
    })
}
