//! Form aggregates.
//!
//! Each form deserializes from the submitted HTML form (all fields as raw
//! strings, named after the backend's wire fields), validates synchronously
//! and builds the Create or Update DTO. Validation never touches the
//! network: a form with errors produces a [`FieldErrors`] map and nothing
//! else.

mod branch;
mod schedule;
mod staff;

use std::collections::BTreeMap;

pub use branch::BranchForm;
pub use schedule::ScheduleForm;
pub use staff::StaffForm;

use crate::types::PhoneNumber;

/// Message shown for any phone that is not 7-15 digits.
pub const INVALID_PHONE: &str = "Teléfono inválido (7-15 dígitos)";

/// Whether a form creates a new entity or edits an existing one.
///
/// In edit mode the foreign-key field is disabled and not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    #[must_use]
    pub const fn is_edit(self) -> bool {
        matches!(self, Self::Edit)
    }

    /// Submit button label.
    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Guardar",
            Self::Edit => "Actualizar",
        }
    }
}

/// Validation messages keyed by wire field name (`"direccion"`).
///
/// At most one message per field; the first failing rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(value)` when no error was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// Split a textarea into trimmed, non-empty lines.
#[must_use]
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Join values back into one-per-line textarea content.
#[must_use]
pub fn join_lines(values: &[String]) -> String {
    values.join("\n")
}

/// Validate every line as a phone number, returning the normalized list
/// or the message for the first invalid one.
fn parse_phone_lines(raw: &str) -> Result<Vec<String>, String> {
    split_lines(raw)
        .iter()
        .map(|line| {
            PhoneNumber::parse(line)
                .map(PhoneNumber::into_inner)
                .map_err(|_| format!("{INVALID_PHONE}: {line}"))
        })
        .collect()
}

fn blank_to_none(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
