use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Schedule, Staff, null_as_default};
use crate::types::BranchId;

/// A physical branch ("sucursal").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    #[serde(rename = "direccion")]
    pub address: String,
    /// Primary phone.
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "latitud")]
    pub latitude: f64,
    #[serde(rename = "longitud")]
    pub longitude: f64,
    #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Missing or `null` means active; the backend creates branches active.
    #[serde(rename = "activa", default = "active_by_default", deserialize_with = "null_as_active")]
    pub active: bool,
    /// Additional phone numbers, in the order the operator entered them.
    #[serde(rename = "numerosContacto", default, deserialize_with = "null_as_default")]
    pub contact_numbers: Vec<String>,
    #[serde(rename = "horarios", default, deserialize_with = "null_as_default")]
    pub schedules: Vec<Schedule>,
    #[serde(rename = "personal", default, deserialize_with = "null_as_default")]
    pub staff: Vec<Staff>,
}

const fn active_by_default() -> bool {
    true
}

fn null_as_active<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Option::<bool>::deserialize(deserializer).map(|v| v.unwrap_or(true))
}

/// Payload for `POST /sucursales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBranch {
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "latitud")]
    pub latitude: f64,
    #[serde(rename = "longitud")]
    pub longitude: f64,
    #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "numerosContacto", default)]
    pub contact_numbers: Vec<String>,
}

/// Payload for `PUT /sucursales/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBranch {
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "latitud", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "activa", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "numerosContacto", default, skip_serializing_if = "Option::is_none")]
    pub contact_numbers: Option<Vec<String>>,
}

/// Branch lookup by id, used to resolve the branch that staff and schedules
/// point at when the backend did not embed a snapshot.
#[derive(Debug, Default)]
pub struct BranchDirectory<'a> {
    by_id: HashMap<BranchId, &'a Branch>,
}

impl<'a> BranchDirectory<'a> {
    #[must_use]
    pub fn new(branches: &'a [Branch]) -> Self {
        Self {
            by_id: branches.iter().map(|b| (b.id, b)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: BranchId) -> Option<&'a Branch> {
        self.by_id.get(&id).copied()
    }

    /// Address of the branch a staff member belongs to.
    ///
    /// The embedded snapshot wins; otherwise `sucursalId` is looked up.
    #[must_use]
    pub fn staff_branch_address(&self, staff: &'a Staff) -> Option<&'a str> {
        if let Some(snapshot) = staff.branch.as_deref() {
            return Some(snapshot.address.as_str());
        }
        staff
            .branch_id
            .and_then(|id| self.get(id))
            .map(|b| b.address.as_str())
    }

    /// Address of the branch a schedule belongs to.
    #[must_use]
    pub fn schedule_branch_address(&self, schedule: &Schedule) -> Option<&'a str> {
        schedule
            .branch_id
            .and_then(|id| self.get(id))
            .map(|b| b.address.as_str())
    }
}
