//! Price observations and input parsing.
//!
//! Prices are the fundamental unit of the model, so anything that does not
//! parse as a positive finite number is rejected outright.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format used by price files and configuration (`2017-08-31`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Observation
// =============================================================================

/// One (date, price) row of a per-asset price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Trading date of the observation.
    pub date: NaiveDate,
    /// Price (typically adjusted close).
    pub price: f64,
}

impl Observation {
    /// Create a new observation.
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// Parse an observation from raw text fields.
    pub fn parse(date: &str, price: &str) -> Result<Self, ObservationError> {
        Ok(Self {
            date: parse_date(date)?,
            price: parse_price(price)?,
        })
    }
}

// =============================================================================
// Errors
// =============================================================================

/// A price field that cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    /// Not a number at all.
    #[error("malformed price: {0:?}")]
    Malformed(String),
    /// NaN or infinite.
    #[error("price is not finite: {0}")]
    NotFinite(f64),
    /// Zero or negative; returns would be undefined.
    #[error("price must be positive: {0}")]
    NonPositive(f64),
}

/// A date field that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed date {value:?} (expected YYYY-MM-DD)")]
pub struct DateError {
    pub value: String,
}

/// Either half of an observation failed to parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationError {
    #[error(transparent)]
    Price(#[from] PriceError),
    #[error(transparent)]
    Date(#[from] DateError),
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse a price field.
pub fn parse_price(raw: &str) -> Result<f64, PriceError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| PriceError::Malformed(raw.to_string()))?;
    validate_price(value)
}

/// Check that an already-numeric price is usable.
pub fn validate_price(value: f64) -> Result<f64, PriceError> {
    if !value.is_finite() {
        return Err(PriceError::NotFinite(value));
    }
    if value <= 0.0 {
        return Err(PriceError::NonPositive(value));
    }
    Ok(value)
}

/// Parse a `YYYY-MM-DD` date field.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| DateError {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("101.25"), Ok(101.25));
        assert_eq!(parse_price(" 7 "), Ok(7.0));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert_eq!(
            parse_price("n/a"),
            Err(PriceError::Malformed("n/a".to_string()))
        );
        assert_eq!(parse_price("0"), Err(PriceError::NonPositive(0.0)));
        assert_eq!(parse_price("-3.5"), Err(PriceError::NonPositive(-3.5)));
        assert!(matches!(parse_price("inf"), Err(PriceError::NotFinite(_))));
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2017-08-31").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2017, 8, 31).unwrap());
        assert!(parse_date("08/31/2017").is_err());
    }

    #[test]
    fn test_observation_parse() {
        let obs = Observation::parse("2000-01-03", "55.5").unwrap();
        assert_eq!(obs.price, 55.5);
        assert!(matches!(
            Observation::parse("2000-01-03", "abc"),
            Err(ObservationError::Price(PriceError::Malformed(_)))
        ));
    }
}
