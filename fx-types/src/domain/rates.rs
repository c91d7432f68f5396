//! Rate snapshots and time series, shaped like the service's JSON bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::currency::CurrencyCode;

/// Rates for one base currency on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub base: CurrencyCode,
    pub date: NaiveDate,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

impl ExchangeRate {
    /// Units of `symbol` per one unit of the base, if the snapshot has it.
    pub fn rate(&self, symbol: &CurrencyCode) -> Option<f64> {
        self.rates.get(symbol).copied()
    }
}

/// Daily rates for one base currency over a date window.
///
/// Dates the service has no data for (weekends, holidays) are simply absent.
/// The window bounds are echoed by most services but not all, so they are
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub base: CurrencyCode,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub rates: BTreeMap<NaiveDate, BTreeMap<CurrencyCode, f64>>,
}

impl TimeSeries {
    /// Date-ordered points for one symbol across the whole body.
    ///
    /// Dates missing the symbol are skipped, never filled.
    pub fn series_for(&self, symbol: &CurrencyCode) -> Vec<(NaiveDate, f64)> {
        points(self.rates.iter(), symbol)
    }

    /// Like [`series_for`](Self::series_for), restricted to `[start, end]`.
    pub fn series_between(
        &self,
        symbol: &CurrencyCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(NaiveDate, f64)> {
        // BTreeMap::range panics on an inverted range.
        if start > end {
            return Vec::new();
        }
        points(self.rates.range(start..=end), symbol)
    }
}

fn points<'a, I>(days: I, symbol: &CurrencyCode) -> Vec<(NaiveDate, f64)>
where
    I: Iterator<Item = (&'a NaiveDate, &'a BTreeMap<CurrencyCode, f64>)>,
{
    days.filter_map(|(date, day)| day.get(symbol).map(|rate| (*date, *rate)))
        .collect()
}
