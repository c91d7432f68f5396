//! Port traits (interfaces for adapters).
//!
//! The service layer depends on these traits, not on the HTTP client.

mod rates;

pub use rates::RateProvider;
