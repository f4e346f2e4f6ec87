//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty or only whitespace.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than digits and whitespace.
    #[error("phone number may only contain digits")]
    NotDigits,
    /// The digit count is outside the accepted range.
    #[error("phone number must have {min}-{max} digits (got {got})")]
    Length {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
        /// Digit count found.
        got: usize,
    },
}

/// A phone number as typed by an operator.
///
/// ## Constraints
///
/// - Whitespace anywhere is ignored for validation
/// - After stripping whitespace: 7-15 ASCII digits, nothing else
///
/// The stored value is the trimmed input, so inner spacing chosen by the
/// operator (`"555 1234"`) is kept for display.
///
/// ## Examples
///
/// ```
/// use sucursales_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("5551234").is_ok());
/// assert!(PhoneNumber::parse(" 555 123 4567 ").is_ok());
///
/// assert!(PhoneNumber::parse("123456").is_err());       // too short
/// assert!(PhoneNumber::parse("1234567890123456").is_err()); // too long
/// assert!(PhoneNumber::parse("+5551234").is_err());     // not digits
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 7;
    /// Maximum number of digits.
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `PhoneNumber` from operator input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, contains non-digit characters
    /// (other than whitespace), or has fewer than 7 or more than 15 digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NotDigits);
        }

        let got = digits.len();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&got) {
            return Err(PhoneError::Length {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                got,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the phone number as typed (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_every_length_in_range() {
        for len in 7..=15 {
            let raw = "9".repeat(len);
            assert!(PhoneNumber::parse(&raw).is_ok(), "{len} digits");
        }
    }

    #[test]
    fn test_rejects_lengths_out_of_range() {
        assert!(matches!(
            PhoneNumber::parse("123456"),
            Err(PhoneError::Length { got: 6, .. })
        ));
        assert!(matches!(
            PhoneNumber::parse(&"1".repeat(16)),
            Err(PhoneError::Length { got: 16, .. })
        ));
    }

    #[test]
    fn test_whitespace_is_stripped_before_counting() {
        // 6 digits spread out is still too short
        assert!(PhoneNumber::parse("12 34 56").is_err());
        // 7 digits with spaces and a tab is fine
        let phone = PhoneNumber::parse(" 123 45\t67 ").unwrap();
        assert_eq!(phone.as_str(), "123 45\t67");
    }

    #[test]
    fn test_rejects_non_digits() {
        assert_eq!(PhoneNumber::parse("555-1234"), Err(PhoneError::NotDigits));
        assert_eq!(PhoneNumber::parse("+56912345678"), Err(PhoneError::NotDigits));
        assert_eq!(PhoneNumber::parse("12345a7"), Err(PhoneError::NotDigits));
    }

    #[test]
    fn test_rejects_blank() {
        assert_eq!(PhoneNumber::parse(""), Err(PhoneError::Empty));
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneError::Empty));
    }
}
