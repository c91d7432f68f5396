//! Input validation.
//!
//! Every check either returns the parsed value or a [`ValidationError`];
//! callers never get a boolean to ignore.

use chrono::{Datelike, NaiveDate};

use crate::domain::CurrencyCode;
use crate::error::ValidationError;

/// Accepts exactly three uppercase ASCII letters.
pub fn validate_currency_code(code: &str) -> Result<CurrencyCode, ValidationError> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(CurrencyCode::new_unchecked(code))
    } else {
        Err(ValidationError::CurrencyCode(code.to_string()))
    }
}

/// Validates every code in a list, stopping at the first bad one.
pub fn validate_symbols<S: AsRef<str>>(
    symbols: &[S],
) -> Result<Vec<CurrencyCode>, ValidationError> {
    symbols
        .iter()
        .map(|s| validate_currency_code(s.as_ref()))
        .collect()
}

/// Accepts a real calendar date written strictly as `YYYY-MM-DD`, from year 1
/// onwards.
pub fn validate_date(text: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(ValidationError::Date(text.to_string()));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .filter(|date| date.year() >= 1)
        .ok_or_else(|| ValidationError::Date(text.to_string()))
}

/// Amounts must be finite; negative values are allowed.
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(ValidationError::Amount(amount.to_string()))
    }
}
