use serde::{Deserialize, Serialize};

use super::{FieldErrors, INVALID_PHONE, blank_to_none, join_lines, parse_phone_lines};
use crate::models::{Branch, CreateBranch, UpdateBranch};
use crate::types::{CoordinateError, Latitude, Longitude, PhoneError, PhoneNumber};

/// Branch create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchForm {
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "latitud", default)]
    pub latitude: String,
    #[serde(rename = "longitud", default)]
    pub longitude: String,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: String,
    /// One additional contact number per line.
    #[serde(rename = "numerosContacto", default)]
    pub contact_numbers: String,
}

struct ValidBranch {
    address: String,
    phone: String,
    latitude: f64,
    longitude: f64,
    image_url: Option<String>,
    contact_numbers: Vec<String>,
}

impl BranchForm {
    /// Prefill from an existing branch.
    #[must_use]
    pub fn from_branch(branch: &Branch) -> Self {
        Self {
            address: branch.address.clone(),
            phone: branch.phone.clone(),
            latitude: branch.latitude.to_string(),
            longitude: branch.longitude.to_string(),
            image_url: branch.image_url.clone().unwrap_or_default(),
            contact_numbers: join_lines(&branch.contact_numbers),
        }
    }

    /// Run every field rule.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        match self.parse() {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors,
        }
    }

    /// Build the create payload.
    ///
    /// # Errors
    ///
    /// Returns the field errors when any rule fails.
    pub fn to_create(&self) -> Result<CreateBranch, FieldErrors> {
        let valid = self.parse()?;
        Ok(CreateBranch {
            address: valid.address,
            phone: valid.phone,
            latitude: valid.latitude,
            longitude: valid.longitude,
            image_url: valid.image_url,
            contact_numbers: valid.contact_numbers,
        })
    }

    /// Build the update payload. Every editable field is sent.
    ///
    /// # Errors
    ///
    /// Returns the field errors when any rule fails.
    pub fn to_update(&self) -> Result<UpdateBranch, FieldErrors> {
        let valid = self.parse()?;
        Ok(UpdateBranch {
            address: Some(valid.address),
            phone: Some(valid.phone),
            latitude: Some(valid.latitude),
            longitude: Some(valid.longitude),
            image_url: valid.image_url,
            active: None,
            contact_numbers: Some(valid.contact_numbers),
        })
    }

    fn parse(&self) -> Result<ValidBranch, FieldErrors> {
        let mut errors = FieldErrors::new();

        let address = self.address.trim();
        if address.is_empty() {
            errors.insert("direccion", "La dirección es requerida");
        }

        let phone = match PhoneNumber::parse(&self.phone) {
            Ok(phone) => Some(phone),
            Err(PhoneError::Empty) => {
                errors.insert("telefono", "El teléfono es requerido");
                None
            }
            Err(_) => {
                errors.insert("telefono", INVALID_PHONE);
                None
            }
        };

        let latitude = match Latitude::parse(&self.latitude) {
            Ok(lat) => Some(lat),
            Err(CoordinateError::Empty) => {
                errors.insert("latitud", "La latitud es requerida");
                None
            }
            Err(_) => {
                errors.insert("latitud", "Latitud inválida (-90 a 90)");
                None
            }
        };

        let longitude = match Longitude::parse(&self.longitude) {
            Ok(lng) => Some(lng),
            Err(CoordinateError::Empty) => {
                errors.insert("longitud", "La longitud es requerida");
                None
            }
            Err(_) => {
                errors.insert("longitud", "Longitud inválida (-180 a 180)");
                None
            }
        };

        let contact_numbers = match parse_phone_lines(&self.contact_numbers) {
            Ok(numbers) => numbers,
            Err(message) => {
                errors.insert("numerosContacto", message);
                Vec::new()
            }
        };

        match (phone, latitude, longitude) {
            (Some(phone), Some(latitude), Some(longitude)) if errors.is_empty() => {
                Ok(ValidBranch {
                    address: address.to_owned(),
                    phone: phone.into_inner(),
                    latitude: latitude.value(),
                    longitude: longitude.value(),
                    image_url: blank_to_none(&self.image_url),
                    contact_numbers,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> BranchForm {
        BranchForm {
            address: "  Av. Providencia 1234 ".to_string(),
            phone: "555 1234".to_string(),
            latitude: "-33.4489".to_string(),
            longitude: "-70.6693".to_string(),
            image_url: String::new(),
            contact_numbers: "5559876\n\n5551111".to_string(),
        }
    }

    #[test]
    fn test_valid_form_builds_create() {
        let dto = valid_form().to_create().unwrap();
        assert_eq!(dto.address, "Av. Providencia 1234");
        assert_eq!(dto.phone, "555 1234");
        assert!((dto.latitude + 33.4489).abs() < 1e-9);
        assert!(dto.image_url.is_none());
        assert_eq!(dto.contact_numbers, vec!["5559876", "5551111"]);
    }

    #[test]
    fn test_empty_form_reports_required_fields() {
        let errors = BranchForm::default().validate();
        assert_eq!(errors.get("direccion"), Some("La dirección es requerida"));
        assert_eq!(errors.get("telefono"), Some("El teléfono es requerido"));
        assert_eq!(errors.get("latitud"), Some("La latitud es requerida"));
        assert_eq!(errors.get("longitud"), Some("La longitud es requerida"));
        assert!(!errors.contains("numerosContacto"));
    }

    #[test]
    fn test_format_errors() {
        let form = BranchForm {
            phone: "12345".to_string(),
            latitude: "91".to_string(),
            longitude: "abc".to_string(),
            contact_numbers: "5551234\nno".to_string(),
            ..valid_form()
        };
        let errors = form.validate();
        assert_eq!(errors.get("telefono"), Some(INVALID_PHONE));
        assert_eq!(errors.get("latitud"), Some("Latitud inválida (-90 a 90)"));
        assert_eq!(errors.get("longitud"), Some("Longitud inválida (-180 a 180)"));
        assert!(errors.get("numerosContacto").unwrap().ends_with(": no"));
        assert!(!errors.contains("direccion"));
    }

    #[test]
    fn test_boundary_coordinates_accepted() {
        let form = BranchForm {
            latitude: "90".to_string(),
            longitude: "-180".to_string(),
            ..valid_form()
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_update_sends_full_contact_list() {
        let form = BranchForm {
            contact_numbers: String::new(),
            ..valid_form()
        };
        let dto = form.to_update().unwrap();
        assert_eq!(dto.contact_numbers, Some(vec![]));
        assert!(dto.active.is_none());
    }

    #[test]
    fn test_prefill_round_trips_through_validation() {
        let branch: Branch = serde_json::from_value(serde_json::json!({
            "id": 2,
            "direccion": "Calle Larga 5",
            "telefono": "5550000",
            "latitud": 10.25,
            "longitud": -66.5,
            "numerosContacto": ["5550001"]
        }))
        .unwrap();
        let form = BranchForm::from_branch(&branch);
        assert_eq!(form.latitude, "10.25");
        assert_eq!(form.contact_numbers, "5550001");
        assert!(form.validate().is_empty());
    }
}
