//! Command handlers.
//!
//! Each handler validates its inputs before touching the network, then calls
//! the exchange service or the rate provider directly.

use clap::Subcommand;
use fx_service::{ExchangeService, RateTrends};
use fx_types::{
    Currency, CurrencyCode, ExchangeRate, FxError, RateProvider, validate_amount,
    validate_currency_code, validate_date, validate_symbols,
};
use serde::Serialize;

use crate::config::Config;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert an amount between currencies
    Convert {
        /// Amount to convert
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Source currency code
        #[arg(long)]
        from: String,
        /// Target currency code
        #[arg(long)]
        to: String,
    },
    /// Get latest exchange rates
    Latest {
        /// Base currency code (defaults to DEFAULT_BASE_CURRENCY)
        #[arg(long)]
        base: Option<String>,
        /// Comma-separated target currency codes
        #[arg(long, value_delimiter = ',')]
        symbols: Vec<String>,
    },
    /// Get exchange rates published on a past date
    Historical {
        /// Date in YYYY-MM-DD format
        #[arg(long)]
        date: String,
        #[arg(long)]
        base: Option<String>,
        #[arg(long, value_delimiter = ',')]
        symbols: Vec<String>,
    },
    /// Analyze currency rate trends
    Trends {
        #[arg(long)]
        base: Option<String>,
        /// Comma-separated target currency codes
        #[arg(long, value_delimiter = ',', required = true)]
        symbols: Vec<String>,
        /// Number of days for trend analysis
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=3650))]
        days: u32,
    },
    /// List available currencies
    Currencies,
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub result: f64,
}

/// What a command produced, before rendering.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Conversion(Conversion),
    Rates(ExchangeRate),
    Trends(RateTrends),
    Currencies(Vec<Currency>),
}

/// Runs one command against `provider`.
pub async fn run<P: RateProvider>(
    command: Command,
    provider: P,
    config: &Config,
) -> Result<Output, FxError> {
    match command {
        Command::Convert { amount, from, to } => {
            let amount = validate_amount(amount)?;
            let from = validate_currency_code(&from)?;
            let to = validate_currency_code(&to)?;

            let service = ExchangeService::new(provider, config.cache_expiry);
            let result = service.convert_currency(amount, &from, &to).await?;
            Ok(Output::Conversion(Conversion {
                amount,
                from,
                to,
                result,
            }))
        }

        Command::Latest { base, symbols } => {
            let base = resolve_base(base.as_deref(), config)?;
            let symbols = validate_symbols(&symbols)?;

            let rates = provider.get_latest_rates(Some(&base), &symbols).await?;
            Ok(Output::Rates(rates))
        }

        Command::Historical {
            date,
            base,
            symbols,
        } => {
            let date = validate_date(&date)?;
            let base = resolve_base(base.as_deref(), config)?;
            let symbols = validate_symbols(&symbols)?;

            let rates = provider
                .get_historical_rates(date, Some(&base), &symbols)
                .await?;
            Ok(Output::Rates(rates))
        }

        Command::Trends {
            base,
            symbols,
            days,
        } => {
            let base = resolve_base(base.as_deref(), config)?;
            let symbols = validate_symbols(&symbols)?;

            let service = ExchangeService::new(provider, config.cache_expiry);
            let trends = service.get_rate_trends(&base, &symbols, days).await?;
            Ok(Output::Trends(trends))
        }

        Command::Currencies => {
            let mut service = ExchangeService::new(provider, config.cache_expiry);
            let catalog = service.get_currencies().await?;
            Ok(Output::Currencies(catalog.values().cloned().collect()))
        }
    }
}

fn resolve_base(base: Option<&str>, config: &Config) -> Result<CurrencyCode, FxError> {
    match base {
        Some(code) => Ok(validate_currency_code(code)?),
        None => Ok(config.default_base.clone()),
    }
}
