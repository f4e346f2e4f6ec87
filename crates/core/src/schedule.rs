//! Opening-window validation and duration formatting.
//!
//! A schedule opens and closes on the same day: there is no wraparound past
//! midnight, so a window is valid only when the closing time is strictly
//! later than the opening time. [`format_duration`] is the single source of
//! the duration label; the schedule form preview and the schedule table
//! both call it.

use crate::types::ClockTime;

/// Errors produced when validating an opening window.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// Closing time is equal to or earlier than opening time.
    #[error("La hora de cierre debe ser posterior a la de apertura")]
    ClosesNotAfterOpening,
}

/// A validated same-day opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningWindow {
    opens_at: ClockTime,
    closes_at: ClockTime,
}

impl OpeningWindow {
    /// Validate that `closes_at` is strictly after `opens_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::ClosesNotAfterOpening`] when
    /// `closes_at <= opens_at`.
    pub fn new(opens_at: ClockTime, closes_at: ClockTime) -> Result<Self, ScheduleError> {
        if closes_at.minutes_since_midnight() <= opens_at.minutes_since_midnight() {
            return Err(ScheduleError::ClosesNotAfterOpening);
        }
        Ok(Self {
            opens_at,
            closes_at,
        })
    }

    #[must_use]
    pub const fn opens_at(&self) -> ClockTime {
        self.opens_at
    }

    #[must_use]
    pub const fn closes_at(&self) -> ClockTime {
        self.closes_at
    }

    /// Length of the window in minutes (always > 0).
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.closes_at.minutes_since_midnight() - self.opens_at.minutes_since_midnight()
    }

    /// Duration label: `"Xh Ym"`, or `"Xh"` when the minutes are zero.
    #[must_use]
    pub fn duration_label(&self) -> String {
        let minutes = self.duration_minutes();
        let hours = minutes / 60;
        let rest = minutes % 60;
        if rest > 0 {
            format!("{hours}h {rest}m")
        } else {
            format!("{hours}h")
        }
    }
}

/// Format the duration between two clock times.
///
/// # Errors
///
/// Returns [`ScheduleError::ClosesNotAfterOpening`] when the window is empty
/// or inverted; such a window has no displayable duration.
///
/// # Examples
///
/// ```
/// use sucursales_core::{ClockTime, format_duration};
///
/// let t = |s: &str| s.parse::<ClockTime>().unwrap();
/// assert_eq!(format_duration(t("09:00"), t("17:00")).unwrap(), "8h");
/// assert_eq!(format_duration(t("09:15"), t("13:45")).unwrap(), "4h 30m");
/// assert!(format_duration(t("09:00"), t("09:00")).is_err());
/// ```
pub fn format_duration(opens_at: ClockTime, closes_at: ClockTime) -> Result<String, ScheduleError> {
    OpeningWindow::new(opens_at, closes_at).map(|window| window.duration_label())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> ClockTime {
        ClockTime::from_hm(hour, minute).unwrap()
    }

    #[test]
    fn test_full_hours_omit_minutes() {
        assert_eq!(format_duration(t(9, 0), t(17, 0)).unwrap(), "8h");
        assert_eq!(format_duration(t(0, 0), t(1, 0)).unwrap(), "1h");
    }

    #[test]
    fn test_partial_hours() {
        assert_eq!(format_duration(t(9, 0), t(9, 1)).unwrap(), "0h 1m");
        assert_eq!(format_duration(t(8, 45), t(18, 15)).unwrap(), "9h 30m");
        assert_eq!(format_duration(t(0, 0), t(23, 59)).unwrap(), "23h 59m");
    }

    #[test]
    fn test_rejects_equal_and_inverted() {
        assert_eq!(
            format_duration(t(9, 0), t(9, 0)),
            Err(ScheduleError::ClosesNotAfterOpening)
        );
        assert_eq!(
            format_duration(t(22, 0), t(2, 0)),
            Err(ScheduleError::ClosesNotAfterOpening)
        );
    }

    #[test]
    fn test_label_matches_arithmetic_for_every_quarter_hour_pair() {
        let quarters: Vec<ClockTime> = (0..24)
            .flat_map(|h| [0, 15, 30, 45].map(|m| t(h, m)))
            .collect();

        for &open in &quarters {
            for &close in &quarters {
                let a = open.minutes_since_midnight();
                let c = close.minutes_since_midnight();
                let result = format_duration(open, close);
                if c <= a {
                    assert!(result.is_err(), "{open}-{close} must be rejected");
                    continue;
                }
                let diff = c - a;
                let expected = if diff % 60 == 0 {
                    format!("{}h", diff / 60)
                } else {
                    format!("{}h {}m", diff / 60, diff % 60)
                };
                assert_eq!(result.unwrap(), expected, "{open}-{close}");
            }
        }
    }

    #[test]
    fn test_window_accessors() {
        let window = OpeningWindow::new(t(10, 0), t(12, 30)).unwrap();
        assert_eq!(window.opens_at(), t(10, 0));
        assert_eq!(window.closes_at(), t(12, 30));
        assert_eq!(window.duration_minutes(), 150);
    }
}
