//! Rate provider port.
//!
//! Implemented by the HTTP client in `fx-client` and by in-memory mocks in
//! tests.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::domain::{CurrencyCode, ExchangeRate, TimeSeries};
use crate::error::ServiceError;

/// Read-only access to a remote exchange rate service.
///
/// `base` falls back to the service's default when `None`. A non-empty
/// `symbols` restricts the returned rates to exactly those codes.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Latest published rates.
    async fn get_latest_rates(
        &self,
        base: Option<&CurrencyCode>,
        symbols: &[CurrencyCode],
    ) -> Result<ExchangeRate, ServiceError>;

    /// Rates published for a past date.
    async fn get_historical_rates(
        &self,
        date: NaiveDate,
        base: Option<&CurrencyCode>,
        symbols: &[CurrencyCode],
    ) -> Result<ExchangeRate, ServiceError>;

    /// Daily rates from `start_date` to `end_date`.
    ///
    /// Without an end date the window is open-ended and its extent is up to
    /// the service.
    async fn get_time_series(
        &self,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        base: Option<&CurrencyCode>,
        symbols: &[CurrencyCode],
    ) -> Result<TimeSeries, ServiceError>;

    /// The full currency catalog, code to display name.
    async fn get_currencies(&self) -> Result<BTreeMap<CurrencyCode, String>, ServiceError>;
}
