use serde::{Deserialize, Serialize};

use super::Branch;
use crate::types::StaffId;

/// Public projection of a branch for the landing page.
///
/// The backend returns the branch fields (schedules and contact numbers
/// included) plus, optionally, the staff it chooses to show publicly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchLanding {
    #[serde(flatten)]
    pub branch: Branch,
    #[serde(rename = "personalVisible", default, skip_serializing_if = "Option::is_none")]
    pub visible_staff: Option<Vec<PublicStaff>>,
}

/// Staff fields safe to show on the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicStaff {
    pub id: StaffId,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "cargo", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Weekday;

    #[test]
    fn test_deserialize_flattened_landing() {
        let landing: BranchLanding = serde_json::from_value(json!({
            "id": 1,
            "direccion": "Av. Central 100",
            "telefono": "5550000",
            "latitud": 10.5,
            "longitud": -66.9,
            "activa": false,
            "numerosContacto": ["5550001", "5550002"],
            "horarios": [
                {"id": 1, "diaSemana": "SATURDAY", "horaApertura": "10:00", "horaCierre": "14:00"}
            ],
            "personalVisible": [{"id": 4, "nombreCompleto": "Marta Ruiz", "cargo": "Gerente"}]
        }))
        .unwrap();

        assert!(!landing.branch.active);
        assert_eq!(landing.branch.contact_numbers.len(), 2);
        assert_eq!(landing.branch.schedules[0].weekday, Weekday::Saturday);
        let staff = landing.visible_staff.unwrap();
        assert_eq!(staff[0].role.as_deref(), Some("Gerente"));
    }

    #[test]
    fn test_visible_staff_is_optional() {
        let landing: BranchLanding = serde_json::from_value(json!({
            "id": 1,
            "direccion": "Av. Central 100",
            "telefono": "5550000",
            "latitud": 0,
            "longitud": 0
        }))
        .unwrap();
        assert!(landing.visible_staff.is_none());
        assert!(landing.branch.schedules.is_empty());
    }
}
