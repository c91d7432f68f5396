//! Domain models for the fx client.

pub mod currency;
pub mod rates;

pub use currency::{Currency, CurrencyCode};
pub use rates::{ExchangeRate, TimeSeries};
