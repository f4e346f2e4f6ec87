//! `/personal` adapter.

use reqwest::Method;
use sucursales_core::{BranchId, CreateStaff, Staff, StaffId, UpdateStaff};
use tracing::instrument;

use super::{BackendClient, BackendError};

/// Staff endpoints.
#[derive(Clone)]
pub struct StaffApi {
    client: BackendClient,
}

impl StaffApi {
    pub(super) const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET /personal`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Staff>, BackendError> {
        self.client.get("personal").await
    }

    /// `GET /personal/{id}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` for unknown ids.
    #[instrument(skip(self), fields(staff_id = %id))]
    pub async fn get_by_id(&self, id: StaffId) -> Result<Staff, BackendError> {
        self.client.get(&format!("personal/{id}")).await
    }

    /// `POST /personal/{sucursalId}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the staff member.
    #[instrument(skip(self, dto), fields(branch_id = %branch_id))]
    pub async fn create(&self, branch_id: BranchId, dto: &CreateStaff) -> Result<Staff, BackendError> {
        self.client
            .send_json(Method::POST, &format!("personal/{branch_id}"), dto)
            .await
    }

    /// `PUT /personal/{id}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the update.
    #[instrument(skip(self, dto), fields(staff_id = %id))]
    pub async fn update(&self, id: StaffId, dto: &UpdateStaff) -> Result<Staff, BackendError> {
        self.client
            .send_json(Method::PUT, &format!("personal/{id}"), dto)
            .await
    }

    /// `DELETE /personal/{id}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self), fields(staff_id = %id))]
    pub async fn delete(&self, id: StaffId) -> Result<(), BackendError> {
        self.client.delete(&format!("personal/{id}")).await
    }

    /// `PUT /personal/{id}/asignar?sucursalId=` for staff without a branch.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self), fields(staff_id = %id, branch_id = %branch_id))]
    pub async fn assign_branch(&self, id: StaffId, branch_id: BranchId) -> Result<Staff, BackendError> {
        self.client
            .put_query(
                &format!("personal/{id}/asignar"),
                &[("sucursalId", branch_id.to_string())],
            )
            .await
    }

    /// `PUT /personal/{id}/reasignar?nuevaSucursalId=`.
    ///
    /// The backend clears the corporate number as part of the move.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self), fields(staff_id = %id, branch_id = %new_branch_id))]
    pub async fn reassign_branch(
        &self,
        id: StaffId,
        new_branch_id: BranchId,
    ) -> Result<Staff, BackendError> {
        self.client
            .put_query(
                &format!("personal/{id}/reasignar"),
                &[("nuevaSucursalId", new_branch_id.to_string())],
            )
            .await
    }
}
