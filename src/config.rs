use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{Money, PricingError, PricingPolicy};

/// Store configuration loaded from environment variables.
///
/// | Env Var                    | Default                        |
/// |----------------------------|--------------------------------|
/// | `HOST`                     | `0.0.0.0`                      |
/// | `PORT`                     | `8083`                         |
/// | `DATABASE_URL`             | `sqlite://watches.db?mode=rwc` |
/// | `DATABASE_MAX_CONNECTIONS` | `5`                            |
/// | `NATS_URL`                 | unset                          |
/// | `CART_IDLE_TIMEOUT_SECS`   | `7200`                         |
/// | `FREE_SHIPPING_THRESHOLD`  | `500.00`                       |
/// | `STANDARD_SHIPPING_FEE`    | `25.00`                        |
/// | `TAX_RATE`                 | `0.08`                         |
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Order events are only published when this is set.
    pub nats_url: Option<String>,
    /// Carts untouched for this long are dropped by the session sweep.
    pub cart_idle_timeout_secs: u32,
    pub pricing: PricingPolicy,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = PricingPolicy::default();

        let pricing = PricingPolicy::new(
            parse_or(&get, "FREE_SHIPPING_THRESHOLD", defaults.free_shipping_threshold())?,
            parse_or(&get, "STANDARD_SHIPPING_FEE", defaults.standard_shipping_fee())?,
            parse_or::<Decimal, _>(&get, "TAX_RATE", defaults.tax_rate())?,
        )?;

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&get, "PORT", 8083)?,
            database_url: get("DATABASE_URL").unwrap_or_else(|| "sqlite://watches.db?mode=rwc".into()),
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
            nats_url: get("NATS_URL"),
            cart_idle_timeout_secs: parse_or(&get, "CART_IDLE_TIMEOUT_SECS", 7_200)?,
            pricing,
        })
    }

    pub fn bind_address(&self) -> String { format!("{}:{}", self.host, self.port) }

    pub fn cart_idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.cart_idle_timeout_secs))
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid { key, value: raw.clone(), reason: e.to_string() }),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid { key: &'static str, value: String, reason: String },
    #[error("invalid pricing policy: {0}")]
    Pricing(#[from] PricingError),
}
