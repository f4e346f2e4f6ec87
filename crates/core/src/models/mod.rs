//! Entities returned by the backend and the DTOs it accepts.
//!
//! Field names follow Rust conventions; the backend's camelCase Spanish
//! wire names are kept through serde renames.
//!
//! Ownership: a [`Branch`] is the aggregate root and embeds its schedules
//! and staff, but [`Staff`] and [`Schedule`] are managed through their own
//! endpoints and refer back to the branch by id.

mod branch;
mod landing;
mod schedule;
mod staff;

pub use branch::{Branch, BranchDirectory, CreateBranch, UpdateBranch};
pub use landing::{BranchLanding, PublicStaff};
pub use schedule::{CreateSchedule, Schedule, UpdateSchedule};
pub use staff::{CreateStaff, Staff, UpdateStaff};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
