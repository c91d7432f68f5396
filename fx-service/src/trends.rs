//! Rate statistics over a date window.

use chrono::NaiveDate;
use fx_types::CurrencyCode;
use serde::Serialize;

/// Descriptive statistics for one symbol's rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation. `None` below two points.
    pub std_dev: Option<f64>,
}

impl RateStats {
    /// Reduces a sequence of rates. Returns `None` for an empty sequence.
    pub fn from_rates<I>(rates: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        rates
            .into_iter()
            .fold(Accumulator::default(), Accumulator::push)
            .finish()
    }
}

/// Single pass over the rates: count, running mean, min, max and the sum of
/// squared deviations from the mean (Welford).
#[derive(Debug, Default)]
struct Accumulator {
    count: usize,
    mean: f64,
    squared_deviations: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn push(mut self, rate: f64) -> Self {
        if self.count == 0 {
            self.min = rate;
            self.max = rate;
        } else {
            self.min = self.min.min(rate);
            self.max = self.max.max(rate);
        }
        self.count += 1;
        let delta = rate - self.mean;
        self.mean += delta / self.count as f64;
        self.squared_deviations += delta * (rate - self.mean);
        self
    }

    fn finish(self) -> Option<RateStats> {
        if self.count == 0 {
            return None;
        }
        let std_dev =
            (self.count > 1).then(|| (self.squared_deviations / (self.count - 1) as f64).sqrt());
        Some(RateStats {
            count: self.count,
            mean: self.mean,
            min: self.min,
            max: self.max,
            std_dev,
        })
    }
}

/// One symbol's points and statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolTrend {
    pub symbol: CurrencyCode,
    /// Date-ordered `(date, rate)` pairs; dates without a rate are absent.
    pub points: Vec<(NaiveDate, f64)>,
    /// `None` when the window held no points for this symbol.
    pub stats: Option<RateStats>,
}

impl SymbolTrend {
    pub fn new(symbol: CurrencyCode, points: Vec<(NaiveDate, f64)>) -> Self {
        let stats = RateStats::from_rates(points.iter().map(|(_, rate)| *rate));
        Self {
            symbol,
            points,
            stats,
        }
    }
}

/// Trend report for a base currency against the requested symbols.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTrends {
    pub base: CurrencyCode,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    /// One entry per requested symbol, in request order.
    pub trends: Vec<SymbolTrend>,
}

impl RateTrends {
    pub fn get(&self, symbol: &CurrencyCode) -> Option<&SymbolTrend> {
        self.trends.iter().find(|t| &t.symbol == symbol)
    }
}
