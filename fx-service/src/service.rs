//! Exchange Application Service
//!
//! Composes a rate provider with the currency catalog cache.
//! Contains NO transport logic - every failure from the provider is passed
//! through unchanged, and nothing is retried.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{Days, Local, NaiveDate};
use fx_types::{Currency, CurrencyCode, RateProvider, ServiceError};

use crate::cache::CurrencyCache;
use crate::trends::{RateTrends, SymbolTrend};

/// Application service for exchange operations.
///
/// Generic over `P: RateProvider` - the HTTP client in production, an
/// in-memory provider in tests. Owns its catalog cache exclusively.
pub struct ExchangeService<P: RateProvider> {
    provider: P,
    cache: CurrencyCache,
}

impl<P: RateProvider> ExchangeService<P> {
    /// Creates a service with an empty catalog cache.
    pub fn new(provider: P, cache_expiry: Duration) -> Self {
        Self {
            provider,
            cache: CurrencyCache::new(cache_expiry),
        }
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &CurrencyCache {
        &self.cache
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency Catalog
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the currency catalog, refetching it in full when stale.
    pub async fn get_currencies(
        &mut self,
    ) -> Result<&BTreeMap<CurrencyCode, Currency>, ServiceError> {
        if self.cache.is_fresh() {
            tracing::debug!(entries = self.cache.entries().len(), "currency catalog cache hit");
        } else {
            let names = self.provider.get_currencies().await?;
            let entries: BTreeMap<_, _> = names
                .into_iter()
                .map(|(code, name)| (code.clone(), Currency::new(code, name)))
                .collect();
            tracing::info!(entries = entries.len(), "currency catalog refreshed");
            self.cache.replace(entries);
        }
        Ok(self.cache.entries())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount` of `from` into `to` at the latest rate. Not rounded.
    pub async fn convert_currency(
        &self,
        amount: f64,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<f64, ServiceError> {
        let latest = self
            .provider
            .get_latest_rates(Some(from), std::slice::from_ref(to))
            .await?;
        let rate = latest.rate(to).ok_or_else(|| ServiceError::MissingRate {
            base: from.clone(),
            symbol: to.clone(),
        })?;
        tracing::debug!(%from, %to, rate, date = %latest.date, "converted");
        Ok(amount * rate)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Trend Analysis
    // ─────────────────────────────────────────────────────────────────────────────

    /// Trend statistics over the `days` calendar days ending today.
    pub async fn get_rate_trends(
        &self,
        base: &CurrencyCode,
        symbols: &[CurrencyCode],
        days: u32,
    ) -> Result<RateTrends, ServiceError> {
        let today = Local::now().date_naive();
        self.get_rate_trends_until(base, symbols, days, today).await
    }

    /// Trend statistics over the `days` calendar days ending on `end_date`.
    ///
    /// Points outside the requested window are dropped whatever window the
    /// response claims. A symbol with no points in the window gets
    /// `stats: None` rather than an error.
    pub async fn get_rate_trends_until(
        &self,
        base: &CurrencyCode,
        symbols: &[CurrencyCode],
        days: u32,
        end_date: NaiveDate,
    ) -> Result<RateTrends, ServiceError> {
        let start_date = end_date
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);

        let series = self
            .provider
            .get_time_series(start_date, Some(end_date), Some(base), symbols)
            .await?;

        let trends = symbols
            .iter()
            .map(|symbol| {
                let points = series.series_between(symbol, start_date, end_date);
                SymbolTrend::new(symbol.clone(), points)
            })
            .collect::<Vec<_>>();

        for trend in trends.iter().filter(|t| t.stats.is_none()) {
            tracing::warn!(symbol = %trend.symbol, %start_date, %end_date, "no rates in window");
        }

        Ok(RateTrends {
            base: base.clone(),
            start_date,
            end_date,
            days,
            trends,
        })
    }
}
