//! Weekday enumeration used by schedules.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a weekday string is not one of the seven enumerants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown weekday: {0}")]
pub struct WeekdayError(pub String);

/// Day of the week, serialized as the backend's `DayOfWeek` names
/// (`MONDAY` .. `SUNDAY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in calendar order, used to populate selects.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Wire name (`MONDAY`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
    }

    /// Spanish display label (`Lunes`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Lunes",
            Self::Tuesday => "Martes",
            Self::Wednesday => "Miércoles",
            Self::Thursday => "Jueves",
            Self::Friday => "Viernes",
            Self::Saturday => "Sábado",
            Self::Sunday => "Domingo",
        }
    }

    /// Chip colour for tables. Weekend days reuse the first two colours.
    #[must_use]
    pub const fn chip_class(self) -> &'static str {
        match self {
            Self::Monday | Self::Saturday => "chip-primary",
            Self::Tuesday | Self::Sunday => "chip-secondary",
            Self::Wednesday => "chip-success",
            Self::Thursday => "chip-warning",
            Self::Friday => "chip-danger",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = WeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| WeekdayError(trimmed.to_owned()))
    }
}
