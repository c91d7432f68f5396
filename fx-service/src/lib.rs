//! # FX Service
//!
//! Application service layer for the fx client.
//!
//! ## Architecture
//!
//! - `service` - Exchange service (conversion, trends, catalog access)
//! - `cache` - Time-bounded currency catalog cache
//! - `trends` - Rate statistics over a date window
//!
//! The service is generic over `P: RateProvider`, so the HTTP client can be
//! swapped for an in-memory provider in tests.

pub mod cache;
pub mod service;
pub mod trends;

#[cfg(test)]
mod service_tests;

pub use cache::{CurrencyCache, DEFAULT_CACHE_EXPIRY};
pub use service::ExchangeService;
pub use trends::{RateStats, RateTrends, SymbolTrend};
