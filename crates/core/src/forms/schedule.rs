use serde::{Deserialize, Serialize};

use super::{FieldErrors, FormMode};
use crate::models::{CreateSchedule, Schedule, UpdateSchedule};
use crate::schedule::{OpeningWindow, ScheduleError};
use crate::types::{BranchId, ClockTime, ClockTimeError, Weekday};

/// Schedule create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleForm {
    #[serde(rename = "diaSemana", default)]
    pub weekday: String,
    #[serde(rename = "horaApertura", default)]
    pub opens_at: String,
    #[serde(rename = "horaCierre", default)]
    pub closes_at: String,
    #[serde(rename = "sucursalId", default)]
    pub branch_id: String,
}

struct ValidSchedule {
    weekday: Weekday,
    window: OpeningWindow,
    branch_id: Option<BranchId>,
}

impl ScheduleForm {
    #[must_use]
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            weekday: schedule.weekday.as_str().to_owned(),
            opens_at: schedule.opens_at.to_string(),
            closes_at: schedule.closes_at.to_string(),
            branch_id: schedule
                .branch_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn selected_branch(&self) -> Option<BranchId> {
        self.branch_id.parse().ok()
    }

    #[must_use]
    pub fn selected_weekday(&self) -> Option<Weekday> {
        self.weekday.parse().ok()
    }

    /// Live duration preview.
    ///
    /// `None` until both times are valid; otherwise the label or the
    /// close-after-open error.
    #[must_use]
    pub fn duration_preview(&self) -> Option<Result<String, ScheduleError>> {
        let opens = ClockTime::parse(&self.opens_at).ok()?;
        let closes = ClockTime::parse(&self.closes_at).ok()?;
        Some(OpeningWindow::new(opens, closes).map(|w| w.duration_label()))
    }

    #[must_use]
    pub fn validate(&self, mode: FormMode) -> FieldErrors {
        match self.parse(mode) {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors,
        }
    }

    /// # Errors
    ///
    /// Returns the field errors when any rule fails.
    pub fn to_create(&self) -> Result<CreateSchedule, FieldErrors> {
        let valid = self.parse(FormMode::Create)?;
        let Some(branch_id) = valid.branch_id else {
            let mut errors = FieldErrors::new();
            errors.insert("sucursalId", "La sucursal es requerida");
            return Err(errors);
        };
        Ok(CreateSchedule {
            weekday: valid.weekday,
            opens_at: valid.window.opens_at(),
            closes_at: valid.window.closes_at(),
            branch_id,
        })
    }

    /// # Errors
    ///
    /// Returns the field errors when any rule fails.
    pub fn to_update(&self) -> Result<UpdateSchedule, FieldErrors> {
        let valid = self.parse(FormMode::Edit)?;
        Ok(UpdateSchedule {
            weekday: Some(valid.weekday),
            opens_at: Some(valid.window.opens_at()),
            closes_at: Some(valid.window.closes_at()),
        })
    }

    fn parse(&self, mode: FormMode) -> Result<ValidSchedule, FieldErrors> {
        let mut errors = FieldErrors::new();

        let weekday = self.selected_weekday();
        if weekday.is_none() {
            errors.insert("diaSemana", "El día de la semana es requerido");
        }

        let opens = parse_time(
            &self.opens_at,
            "horaApertura",
            "La hora de apertura es requerida",
            &mut errors,
        );
        let closes = parse_time(
            &self.closes_at,
            "horaCierre",
            "La hora de cierre es requerida",
            &mut errors,
        );

        let window = match (opens, closes) {
            (Some(opens), Some(closes)) => match OpeningWindow::new(opens, closes) {
                Ok(window) => Some(window),
                Err(e) => {
                    errors.insert("horaCierre", e.to_string());
                    None
                }
            },
            _ => None,
        };

        let branch_id = match mode {
            FormMode::Edit => None,
            FormMode::Create => {
                let selected = self.selected_branch();
                if selected.is_none() {
                    errors.insert("sucursalId", "La sucursal es requerida");
                }
                selected
            }
        };

        match (weekday, window) {
            (Some(weekday), Some(window)) if errors.is_empty() => Ok(ValidSchedule {
                weekday,
                window,
                branch_id,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_time(
    raw: &str,
    field: &'static str,
    required: &'static str,
    errors: &mut FieldErrors,
) -> Option<ClockTime> {
    match ClockTime::parse(raw) {
        Ok(time) => Some(time),
        Err(ClockTimeError::Empty) => {
            errors.insert(field, required);
            None
        }
        Err(ClockTimeError::Invalid(_)) => {
            errors.insert(field, "Hora inválida (HH:mm)");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(opens: &str, closes: &str) -> ScheduleForm {
        ScheduleForm {
            weekday: "MONDAY".to_string(),
            opens_at: opens.to_string(),
            closes_at: closes.to_string(),
            branch_id: "5".to_string(),
        }
    }

    #[test]
    fn test_monday_nine_to_five() {
        let dto = form("09:00", "17:00").to_create().unwrap();
        assert_eq!(dto.weekday, Weekday::Monday);
        assert_eq!(dto.branch_id, BranchId::new(5));
        assert_eq!(form("09:00", "17:00").duration_preview(), Some(Ok("8h".to_string())));
    }

    #[test]
    fn test_equal_times_rejected() {
        let errors = form("09:00", "09:00").validate(FormMode::Create);
        assert!(
            errors
                .get("horaCierre")
                .unwrap()
                .contains("hora de cierre debe ser posterior")
        );
    }

    #[test]
    fn test_every_non_increasing_pair_rejected() {
        let times: Vec<String> = (0..24)
            .flat_map(|h| [0, 30].map(move |m| format!("{h:02}:{m:02}")))
            .collect();
        for a in &times {
            for c in &times {
                let result = form(a, c).to_create();
                if c <= a {
                    assert!(result.is_err(), "{a}-{c}");
                } else {
                    assert!(result.is_ok(), "{a}-{c}");
                }
            }
        }
    }

    #[test]
    fn test_required_fields() {
        let errors = ScheduleForm::default().validate(FormMode::Create);
        assert_eq!(errors.get("diaSemana"), Some("El día de la semana es requerido"));
        assert_eq!(errors.get("horaApertura"), Some("La hora de apertura es requerida"));
        assert_eq!(errors.get("horaCierre"), Some("La hora de cierre es requerida"));
        assert_eq!(errors.get("sucursalId"), Some("La sucursal es requerida"));
    }

    #[test]
    fn test_edit_mode_skips_branch_and_omits_it() {
        let mut edit = form("10:00", "12:30");
        edit.branch_id = String::new();
        assert!(edit.validate(FormMode::Edit).is_empty());
        let dto = edit.to_update().unwrap();
        assert_eq!(dto.opens_at.unwrap().to_string(), "10:00");
    }

    #[test]
    fn test_preview_waits_for_both_times() {
        assert_eq!(form("09:00", "").duration_preview(), None);
        assert_eq!(
            form("18:00", "08:00").duration_preview(),
            Some(Err(ScheduleError::ClosesNotAfterOpening))
        );
    }

    #[test]
    fn test_invalid_time_format() {
        let errors = form("9am", "17:00").validate(FormMode::Create);
        assert_eq!(errors.get("horaApertura"), Some("Hora inválida (HH:mm)"));
    }
}
