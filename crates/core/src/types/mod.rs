//! Value types for the Sucursales domain.
//!
//! This module provides type-safe wrappers for the scalar fields the
//! backend exchanges and the forms validate.

pub mod clock;
pub mod coordinates;
pub mod email;
pub mod id;
pub mod phone;
pub mod weekday;

pub use clock::{ClockTime, ClockTimeError};
pub use coordinates::{CoordinateError, Latitude, Longitude};
pub use email::{Email, EmailError};
pub use id::*;
pub use phone::{PhoneError, PhoneNumber};
pub use weekday::{Weekday, WeekdayError};
