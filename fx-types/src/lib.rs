//! # FX Types
//!
//! Domain types and port traits for the foreign-exchange rate client.
//! This crate has ZERO external IO dependencies - only data structures,
//! input validation, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the workspace:
//! - `domain/` - Currency codes, currencies, rate snapshots and time series
//! - `ports/` - The `RateProvider` trait the HTTP adapter implements
//! - `validation` - Syntax checks run before any request is issued
//! - `error` - Validation and service error types

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use domain::{Currency, CurrencyCode, ExchangeRate, TimeSeries};
pub use error::{FxError, ServiceError, ValidationError};
pub use ports::RateProvider;
pub use validation::{validate_amount, validate_currency_code, validate_date, validate_symbols};
