//! Text and JSON rendering of command output.

use std::fmt::Write;

use fx_service::{RateStats, RateTrends};
use fx_types::{Currency, ExchangeRate, FxError};

use crate::commands::{Conversion, Output};

/// Renders output as pretty-printed JSON.
pub fn to_json(output: &Output) -> serde_json::Result<String> {
    serde_json::to_string_pretty(output)
}

/// Renders output as human-readable text.
pub fn to_text(output: &Output) -> String {
    match output {
        Output::Conversion(c) => conversion(c),
        Output::Rates(rates) => rate_table(rates),
        Output::Trends(trends) => trend_report(trends),
        Output::Currencies(list) => currency_list(list),
    }
}

/// One-line message for a failed command.
pub fn error_line(err: &FxError) -> String {
    match err {
        FxError::Validation(e) => format!("Invalid input: {}", e),
        FxError::Service(e) => format!("Error: {}", e),
    }
}

fn conversion(c: &Conversion) -> String {
    // Debug keeps the decimal point on whole amounts: `100.0`, `12.5`.
    format!("{:?} {} = {:.2} {}", c.amount, c.from, c.result, c.to)
}

fn rate_table(rates: &ExchangeRate) -> String {
    let mut out = format!("Exchange rates for {} on {}:\n", rates.base, rates.date);
    if rates.rates.is_empty() {
        out.push_str("\n  (no rates returned)");
        return out;
    }
    out.push('\n');
    for (code, rate) in &rates.rates {
        let _ = write!(out, "\n{:<5}{:>14.6}", code, rate);
    }
    out
}

fn trend_report(trends: &RateTrends) -> String {
    let mut out = format!(
        "Trend analysis for {} over {} days ({} to {}):\n",
        trends.base, trends.days, trends.start_date, trends.end_date
    );
    for trend in &trends.trends {
        let _ = write!(out, "\n{}:\n", trend.symbol);
        match &trend.stats {
            Some(stats) => out.push_str(&stat_lines(stats)),
            None => out.push_str("  No data in window\n"),
        }
    }
    out.trim_end().to_string()
}

fn stat_lines(stats: &RateStats) -> String {
    let volatility = match stats.std_dev {
        Some(std_dev) => format!("{:.4}", std_dev),
        None => "n/a".to_string(),
    };
    format!(
        "  Average rate: {:.4}\n  Min rate: {:.4}\n  Max rate: {:.4}\n  Volatility: {}\n  Data points: {}\n",
        stats.mean, stats.min, stats.max, volatility, stats.count
    )
}

fn currency_list(list: &[Currency]) -> String {
    list.iter()
        .map(|c| format!("{:<5}{}", c.code(), c.name()))
        .collect::<Vec<_>>()
        .join("\n")
}
