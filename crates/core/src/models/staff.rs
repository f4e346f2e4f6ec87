use serde::{Deserialize, Serialize};

use super::{Branch, null_as_default};
use crate::types::{BranchId, StaffId};

/// A staff member ("personal") working at one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "correoInstitucional")]
    pub email: String,
    #[serde(rename = "numerosTelefono", default, deserialize_with = "null_as_default")]
    pub phone_numbers: Vec<String>,
    #[serde(rename = "numeroCorporativo", default, skip_serializing_if = "Option::is_none")]
    pub corporate_number: Option<String>,
    #[serde(rename = "sucursalId", default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<BranchId>,
    /// Snapshot of the branch, embedded by some backend responses.
    #[serde(rename = "sucursal", default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Box<Branch>>,
}

impl Staff {
    /// Branch id from `sucursalId`, falling back to the embedded snapshot.
    #[must_use]
    pub fn effective_branch_id(&self) -> Option<BranchId> {
        self.branch_id.or_else(|| self.branch.as_ref().map(|b| b.id))
    }
}

/// Payload for `POST /personal/{sucursalId}`.
///
/// The branch travels in the path; `sucursal_id` is mirrored in the body
/// for backends that read it from there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStaff {
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "correoInstitucional")]
    pub email: String,
    #[serde(rename = "numerosTelefono")]
    pub phone_numbers: Vec<String>,
    #[serde(rename = "numeroCorporativo", default, skip_serializing_if = "Option::is_none")]
    pub corporate_number: Option<String>,
    #[serde(rename = "sucursalId")]
    pub branch_id: BranchId,
}

/// Payload for `PUT /personal/{id}`.
///
/// `corporate_number` is tri-state: `None` leaves it out of the body,
/// `Some(None)` sends an explicit `null`, `Some(Some(_))` sets it. Phone
/// numbers are a full replacement when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStaff {
    #[serde(rename = "nombreCompleto", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "correoInstitucional", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "numerosTelefono", default, skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<Vec<String>>,
    #[serde(
        rename = "numeroCorporativo",
        default,
        skip_serializing_if = "Option::is_none",
        with = "explicit_null"
    )]
    pub corporate_number: Option<Option<String>>,
}

mod explicit_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<Option<String>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<String>>, D::Error> {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_update_sends_explicit_null_for_cleared_corporate_number() {
        let update = UpdateStaff {
            full_name: Some("Ana Pérez".to_string()),
            corporate_number: Some(None),
            ..UpdateStaff::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"nombreCompleto": "Ana Pérez", "numeroCorporativo": null})
        );
    }

    #[test]
    fn test_update_omits_untouched_corporate_number() {
        let value = serde_json::to_value(UpdateStaff::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_update_never_carries_branch() {
        let value = serde_json::to_value(UpdateStaff {
            phone_numbers: Some(vec!["5551234".to_string()]),
            ..UpdateStaff::default()
        })
        .unwrap();
        assert!(value.get("sucursalId").is_none());
    }

    #[test]
    fn test_deserialize_embedded_branch() {
        let staff: Staff = serde_json::from_value(json!({
            "id": 3,
            "nombreCompleto": "Luis Soto",
            "correoInstitucional": "luis@empresa.com",
            "numerosTelefono": null,
            "sucursal": {
                "id": 7,
                "direccion": "Calle 1",
                "telefono": "5551234",
                "latitud": 0.0,
                "longitud": 0.0
            }
        }))
        .unwrap();
        assert!(staff.phone_numbers.is_empty());
        assert!(staff.branch_id.is_none());
        assert_eq!(staff.effective_branch_id(), Some(BranchId::new(7)));
    }
}
