//! Geographic coordinates.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Latitude`] or [`Longitude`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// The input string is empty.
    #[error("coordinate cannot be empty")]
    Empty,
    /// The input is not a number.
    #[error("coordinate must be a number")]
    NotNumeric,
    /// The value is outside the accepted range.
    #[error("coordinate must be between {min} and {max}")]
    OutOfRange {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

fn parse_in_range(s: &str, min: f64, max: f64) -> Result<f64, CoordinateError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CoordinateError::Empty);
    }

    let value: f64 = trimmed.parse().map_err(|_| CoordinateError::NotNumeric)?;
    if value.is_nan() {
        return Err(CoordinateError::NotNumeric);
    }
    if !(min..=max).contains(&value) {
        return Err(CoordinateError::OutOfRange { min, max });
    }

    Ok(value)
}

/// Latitude in degrees, inclusive range [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Latitude(f64);

impl Latitude {
    /// Lower bound.
    pub const MIN: f64 = -90.0;
    /// Upper bound.
    pub const MAX: f64 = 90.0;

    /// Parse a latitude from form input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, not numeric, or out of range.
    pub fn parse(s: &str) -> Result<Self, CoordinateError> {
        parse_in_range(s, Self::MIN, Self::MAX).map(Self)
    }

    /// Degrees as `f64`.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Longitude in degrees, inclusive range [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Longitude(f64);

impl Longitude {
    /// Lower bound.
    pub const MIN: f64 = -180.0;
    /// Upper bound.
    pub const MAX: f64 = 180.0;

    /// Parse a longitude from form input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, not numeric, or out of range.
    pub fn parse(s: &str) -> Result<Self, CoordinateError> {
        parse_in_range(s, Self::MIN, Self::MAX).map(Self)
    }

    /// Degrees as `f64`.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_bounds_are_inclusive() {
        assert!((Latitude::parse("-90").unwrap().value() + 90.0).abs() < f64::EPSILON);
        assert!((Latitude::parse("90").unwrap().value() - 90.0).abs() < f64::EPSILON);
        assert!(Latitude::parse("-33.4489").is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert!(matches!(
            Latitude::parse("90.0001"),
            Err(CoordinateError::OutOfRange { .. })
        ));
        assert!(matches!(
            Latitude::parse("-91"),
            Err(CoordinateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_longitude_bounds_are_inclusive() {
        assert!(Longitude::parse("-180").is_ok());
        assert!(Longitude::parse("180").is_ok());
        assert!(matches!(
            Longitude::parse("180.5"),
            Err(CoordinateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(Latitude::parse("norte"), Err(CoordinateError::NotNumeric));
        assert_eq!(Longitude::parse("NaN"), Err(CoordinateError::NotNumeric));
        assert_eq!(Longitude::parse("12,5"), Err(CoordinateError::NotNumeric));
    }

    #[test]
    fn test_infinity_is_out_of_range() {
        assert!(matches!(
            Latitude::parse("inf"),
            Err(CoordinateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_empty() {
        assert_eq!(Latitude::parse(""), Err(CoordinateError::Empty));
        assert_eq!(Longitude::parse("  "), Err(CoordinateError::Empty));
    }
}
