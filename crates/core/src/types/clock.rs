//! Wall-clock time of day (`HH:mm`).

use core::fmt;
use core::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`ClockTime`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockTimeError {
    /// The input string is empty.
    #[error("time cannot be empty")]
    Empty,
    /// The input is not a valid `HH:mm` time.
    #[error("invalid time '{0}', expected HH:mm")]
    Invalid(String),
}

/// A time of day with minute precision.
///
/// Parses `HH:mm` (what forms submit) and `HH:mm:ss` (what a Java
/// `LocalTime` may serialize to); always formats and serializes as `HH:mm`.
/// Seconds are discarded.
///
/// ## Examples
///
/// ```
/// use sucursales_core::ClockTime;
///
/// let opens: ClockTime = "09:30".parse().unwrap();
/// assert_eq!(opens.minutes_since_midnight(), 570);
/// assert_eq!(opens.to_string(), "09:30");
///
/// let from_backend: ClockTime = "17:00:00".parse().unwrap();
/// assert_eq!(from_backend.to_string(), "17:00");
///
/// assert!("25:00".parse::<ClockTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a time from hour and minute, if in range.
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a `HH:mm` or `HH:mm:ss` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not a valid time of day.
    pub fn parse(s: &str) -> Result<Self, ClockTimeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ClockTimeError::Empty);
        }

        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(|t| Self(t.with_second(0).unwrap_or(t)))
            .map_err(|_| ClockTimeError::Invalid(trimmed.to_owned()))
    }

    /// Hour component (0-23).
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute component (0-59).
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight: `hour * 60 + minute`.
    #[must_use]
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hh_mm() {
        let t = ClockTime::parse("08:05").unwrap();
        assert_eq!(t.hour(), 8);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.minutes_since_midnight(), 485);
    }

    #[test]
    fn test_parse_drops_seconds() {
        let t = ClockTime::parse("23:59:59").unwrap();
        assert_eq!(t.to_string(), "23:59");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(ClockTime::parse(""), Err(ClockTimeError::Empty));
        assert_eq!(ClockTime::parse("   "), Err(ClockTimeError::Empty));
        assert!(matches!(
            ClockTime::parse("24:00"),
            Err(ClockTimeError::Invalid(_))
        ));
        assert!(matches!(
            ClockTime::parse("nueve"),
            Err(ClockTimeError::Invalid(_))
        ));
        assert!(matches!(
            ClockTime::parse("12:60"),
            Err(ClockTimeError::Invalid(_))
        ));
    }

    #[test]
    fn test_serialize_as_hh_mm() {
        let t = ClockTime::from_hm(7, 0).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:00\"");
    }

    #[test]
    fn test_deserialize_local_time_with_seconds() {
        let t: ClockTime = serde_json::from_str("\"18:30:00\"").unwrap();
        assert_eq!(t, ClockTime::from_hm(18, 30).unwrap());
    }
}
