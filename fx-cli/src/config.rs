//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use fx_client::DEFAULT_TIMEOUT;
use fx_service::DEFAULT_CACHE_EXPIRY;
use fx_types::{CurrencyCode, validate_currency_code};

const DEFAULT_API_URL: &str = "http://localhost:8080/v1";
const DEFAULT_BASE_CURRENCY: &str = "EUR";

/// Application configuration, resolved once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub default_base: CurrencyCode,
    pub request_timeout: Duration,
    pub cache_expiry: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("FOREX_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let base = lookup("DEFAULT_BASE_CURRENCY")
            .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string());
        let default_base = validate_currency_code(&base)
            .map_err(|e| anyhow::anyhow!("DEFAULT_BASE_CURRENCY: {}", e))?;

        let request_timeout = secs(&lookup, "FOREX_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT)?;
        let cache_expiry = secs(&lookup, "FOREX_CACHE_EXPIRY_SECS", DEFAULT_CACHE_EXPIRY)?;

        Ok(Self {
            api_url,
            default_base,
            request_timeout,
            cache_expiry,
        })
    }
}

fn secs<F>(lookup: &F, key: &str, default: Duration) -> anyhow::Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                anyhow::anyhow!("{} must be a whole number of seconds, got {:?}", key, value)
            }),
        None => Ok(default),
    }
}
