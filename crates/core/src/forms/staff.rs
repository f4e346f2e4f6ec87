use serde::{Deserialize, Serialize};

use super::{FieldErrors, FormMode, blank_to_none, join_lines, parse_phone_lines};
use crate::models::{CreateStaff, Staff, UpdateStaff};
use crate::types::{BranchId, Email, EmailError};

/// Staff create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffForm {
    #[serde(rename = "nombreCompleto", default)]
    pub full_name: String,
    #[serde(rename = "correoInstitucional", default)]
    pub email: String,
    /// One phone number per line.
    #[serde(rename = "numerosTelefono", default)]
    pub phone_numbers: String,
    #[serde(rename = "numeroCorporativo", default)]
    pub corporate_number: String,
    /// Raw select value; ignored in edit mode.
    #[serde(rename = "sucursalId", default)]
    pub branch_id: String,
}

struct ValidStaff {
    full_name: String,
    email: String,
    phone_numbers: Vec<String>,
    corporate_number: Option<String>,
    branch_id: Option<BranchId>,
}

impl StaffForm {
    /// Prefill from an existing staff member.
    #[must_use]
    pub fn from_staff(staff: &Staff) -> Self {
        Self {
            full_name: staff.full_name.clone(),
            email: staff.email.clone(),
            phone_numbers: join_lines(&staff.phone_numbers),
            corporate_number: staff.corporate_number.clone().unwrap_or_default(),
            branch_id: staff
                .effective_branch_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    /// Selected branch, if the select holds a valid id.
    #[must_use]
    pub fn selected_branch(&self) -> Option<BranchId> {
        self.branch_id.parse().ok()
    }

    #[must_use]
    pub fn validate(&self, mode: FormMode) -> FieldErrors {
        match self.parse(mode) {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors,
        }
    }

    /// Build the create payload; the branch is required.
    ///
    /// # Errors
    ///
    /// Returns the field errors when any rule fails.
    pub fn to_create(&self) -> Result<CreateStaff, FieldErrors> {
        let valid = self.parse(FormMode::Create)?;
        let Some(branch_id) = valid.branch_id else {
            let mut errors = FieldErrors::new();
            errors.insert("sucursalId", "La sucursal es requerida");
            return Err(errors);
        };
        Ok(CreateStaff {
            full_name: valid.full_name,
            email: valid.email,
            phone_numbers: valid.phone_numbers,
            corporate_number: valid.corporate_number,
            branch_id,
        })
    }

    /// Build the update payload. Phones replace the stored list and an
    /// empty corporate number is sent as an explicit `null`.
    ///
    /// # Errors
    ///
    /// Returns the field errors when any rule fails.
    pub fn to_update(&self) -> Result<UpdateStaff, FieldErrors> {
        let valid = self.parse(FormMode::Edit)?;
        Ok(UpdateStaff {
            full_name: Some(valid.full_name),
            email: Some(valid.email),
            phone_numbers: Some(valid.phone_numbers),
            corporate_number: Some(valid.corporate_number),
        })
    }

    fn parse(&self, mode: FormMode) -> Result<ValidStaff, FieldErrors> {
        let mut errors = FieldErrors::new();

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            errors.insert("nombreCompleto", "El nombre completo es requerido");
        }

        let email = self.email.trim();
        match Email::parse(email) {
            Ok(_) => {}
            Err(EmailError::Empty) => {
                errors.insert("correoInstitucional", "El correo institucional es requerido");
            }
            Err(_) => errors.insert("correoInstitucional", "Correo electrónico inválido"),
        }

        let phone_numbers = match parse_phone_lines(&self.phone_numbers) {
            Ok(numbers) if numbers.is_empty() => {
                errors.insert("numerosTelefono", "Debe agregar al menos un número de teléfono");
                numbers
            }
            Ok(numbers) => numbers,
            Err(message) => {
                errors.insert("numerosTelefono", message);
                Vec::new()
            }
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

        errors.into_result(|| ValidStaff {
            full_name: full_name.to_owned(),
            email: email.to_owned(),
            phone_numbers,
            corporate_number: blank_to_none(&self.corporate_number),
            branch_id,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> StaffForm {
        StaffForm {
            full_name: "Ana Pérez".to_string(),
            email: "ana.perez@empresa.com".to_string(),
            phone_numbers: "5551234\n5559876".to_string(),
            corporate_number: String::new(),
            branch_id: "5".to_string(),
        }
    }

    #[test]
    fn test_create_requires_branch() {
        let form = StaffForm {
            branch_id: String::new(),
            ..valid_form()
        };
        let errors = form.to_create().unwrap_err();
        assert_eq!(errors.get("sucursalId"), Some("La sucursal es requerida"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_edit_ignores_branch() {
        let form = StaffForm {
            branch_id: String::new(),
            ..valid_form()
        };
        assert!(form.validate(FormMode::Edit).is_empty());
        let dto = form.to_update().unwrap();
        assert_eq!(dto.corporate_number, Some(None));
        assert_eq!(dto.phone_numbers.unwrap().len(), 2);
    }

    #[test]
    fn test_create_builds_dto() {
        let form = StaffForm {
            corporate_number: " 4400 ".to_string(),
            ..valid_form()
        };
        let dto = form.to_create().unwrap();
        assert_eq!(dto.branch_id, BranchId::new(5));
        assert_eq!(dto.corporate_number.as_deref(), Some("4400"));
    }

    #[test]
    fn test_requires_at_least_one_phone() {
        let form = StaffForm {
            phone_numbers: " \n ".to_string(),
            ..valid_form()
        };
        assert_eq!(
            form.validate(FormMode::Create).get("numerosTelefono"),
            Some("Debe agregar al menos un número de teléfono")
        );
    }

    #[test]
    fn test_email_rules() {
        let mut form = StaffForm {
            email: String::new(),
            ..valid_form()
        };
        assert_eq!(
            form.validate(FormMode::Create).get("correoInstitucional"),
            Some("El correo institucional es requerido")
        );
        form.email = "ana@empresa".to_string();
        assert_eq!(
            form.validate(FormMode::Create).get("correoInstitucional"),
            Some("Correo electrónico inválido")
        );
    }

    #[test]
    fn test_blank_name() {
        let form = StaffForm {
            full_name: "   ".to_string(),
            ..valid_form()
        };
        assert_eq!(
            form.validate(FormMode::Create).get("nombreCompleto"),
            Some("El nombre completo es requerido")
        );
    }
}
