//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `STOREFRONT_DELIVERY_FEE` - Flat delivery fee in rupees (default: 40.00)
//! - `STOREFRONT_TAX_RATE` - GST rate as a fraction (default: 0.05)

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use foodiehub_core::Money;

use crate::checkout::CheckoutPolicy;

const DEFAULT_DELIVERY_FEE: &str = "40.00";
const DEFAULT_TAX_RATE: &str = "0.05";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Checkout pricing policy (delivery fee + GST rate)
    pub checkout: CheckoutPolicy,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any
    /// value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = std::env::var("STOREFRONT_DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("STOREFRONT_DATABASE_URL".to_string()))?
            .into();

        let delivery_fee = get_env_or_default("STOREFRONT_DELIVERY_FEE", DEFAULT_DELIVERY_FEE);
        let tax_rate = get_env_or_default("STOREFRONT_TAX_RATE", DEFAULT_TAX_RATE);
        let checkout = parse_checkout_policy(&delivery_fee, &tax_rate)?;

        Ok(Self {
            database_url,
            checkout,
        })
    }
}

/// Get an environment variable or a default value.
fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse the checkout policy from its two raw env values.
fn parse_checkout_policy(delivery_fee: &str, tax_rate: &str) -> Result<CheckoutPolicy, ConfigError> {
    let delivery_fee = Money::parse(delivery_fee).map_err(|e| {
        ConfigError::InvalidEnvVar("STOREFRONT_DELIVERY_FEE".to_string(), e.to_string())
    })?;

    let tax_rate: Decimal = tax_rate.trim().parse().map_err(|_| {
        ConfigError::InvalidEnvVar(
            "STOREFRONT_TAX_RATE".to_string(),
            format!("not a decimal: {tax_rate}"),
        )
    })?;

    // A rate of 1.0 would double the bill; anything at or past it is a typo.
    if tax_rate.is_sign_negative() || tax_rate >= Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            "STOREFRONT_TAX_RATE".to_string(),
            format!("rate must be in [0, 1): {tax_rate}"),
        ));
    }

    Ok(CheckoutPolicy {
        delivery_fee,
        tax_rate,
    })
}
