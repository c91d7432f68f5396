//! Error types for the fx client.

use crate::domain::CurrencyCode;

/// Input errors, raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid currency code: {0}")]
    CurrencyCode(String),

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    Date(String),

    #[error("Invalid amount: {0}")]
    Amount(String),
}

/// Failures talking to the remote rate service.
///
/// Every transport, status and decoding problem collapses into this one kind.
/// Nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("API request failed: {0}")]
    Transport(String),

    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("API request failed: invalid response body: {0}")]
    Decode(String),

    #[error("Rate for {symbol} not found in {base} response")]
    MissingRate {
        base: CurrencyCode,
        symbol: CurrencyCode,
    },
}

/// Command-level errors.
///
/// Command handlers return this; the binary matches on the variant to pick
/// the message it prints.
#[derive(Debug, thiserror::Error)]
pub enum FxError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}
