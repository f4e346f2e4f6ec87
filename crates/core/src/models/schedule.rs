use serde::{Deserialize, Serialize};

use crate::schedule::{ScheduleError, format_duration};
use crate::types::{BranchId, ClockTime, ScheduleId, Weekday};

/// A weekly opening window ("horario") of one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    #[serde(rename = "diaSemana")]
    pub weekday: Weekday,
    #[serde(rename = "horaApertura")]
    pub opens_at: ClockTime,
    #[serde(rename = "horaCierre")]
    pub closes_at: ClockTime,
    #[serde(rename = "sucursalId", default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<BranchId>,
}

impl Schedule {
    /// `"HH:mm - HH:mm"`.
    #[must_use]
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.opens_at, self.closes_at)
    }

    /// Duration label of the window.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored window closes at or before it opens.
    pub fn duration_label(&self) -> Result<String, ScheduleError> {
        format_duration(self.opens_at, self.closes_at)
    }
}

/// Payload for `POST /horarios/{sucursalId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSchedule {
    #[serde(rename = "diaSemana")]
    pub weekday: Weekday,
    #[serde(rename = "horaApertura")]
    pub opens_at: ClockTime,
    #[serde(rename = "horaCierre")]
    pub closes_at: ClockTime,
    #[serde(rename = "sucursalId")]
    pub branch_id: BranchId,
}

/// Payload for `PUT /horarios/{id}`. The branch cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSchedule {
    #[serde(rename = "diaSemana", default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<Weekday>,
    #[serde(rename = "horaApertura", default, skip_serializing_if = "Option::is_none")]
    pub opens_at: Option<ClockTime>,
    #[serde(rename = "horaCierre", default, skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<ClockTime>,
}
