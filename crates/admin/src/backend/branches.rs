//! `/sucursales` adapter.

use reqwest::Method;
use sucursales_core::{Branch, BranchId, BranchLanding, CreateBranch, UpdateBranch};
use tracing::instrument;

use super::{BackendClient, BackendError};

/// Branch endpoints.
#[derive(Clone)]
pub struct BranchApi {
    client: BackendClient,
}

impl BranchApi {
    pub(super) const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET /sucursales`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Branch>, BackendError> {
        self.client.get("sucursales").await
    }

    /// `GET /sucursales/{id}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` for unknown ids.
    #[instrument(skip(self), fields(branch_id = %id))]
    pub async fn get_by_id(&self, id: BranchId) -> Result<Branch, BackendError> {
        self.client.get(&format!("sucursales/{id}")).await
    }

    /// `POST /sucursales`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the branch.
    #[instrument(skip(self, dto))]
    pub async fn create(&self, dto: &CreateBranch) -> Result<Branch, BackendError> {
        self.client.send_json(Method::POST, "sucursales", dto).await
    }

    /// `PUT /sucursales/{id}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the update.
    #[instrument(skip(self, dto), fields(branch_id = %id))]
    pub async fn update(&self, id: BranchId, dto: &UpdateBranch) -> Result<Branch, BackendError> {
        self.client
            .send_json(Method::PUT, &format!("sucursales/{id}"), dto)
            .await
    }

    /// `PUT /sucursales/{id}/estado?activa={active}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self), fields(branch_id = %id))]
    pub async fn toggle_active(&self, id: BranchId, active: bool) -> Result<Branch, BackendError> {
        self.client
            .put_query(
                &format!("sucursales/{id}/estado"),
                &[("activa", active.to_string())],
            )
            .await
    }

    /// Mark the branch active.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    pub async fn activate(&self, id: BranchId) -> Result<Branch, BackendError> {
        self.toggle_active(id, true).await
    }

    /// Mark the branch inactive.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    pub async fn deactivate(&self, id: BranchId) -> Result<Branch, BackendError> {
        self.toggle_active(id, false).await
    }

    /// `DELETE /sucursales/{id}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self), fields(branch_id = %id))]
    pub async fn delete(&self, id: BranchId) -> Result<(), BackendError> {
        self.client.delete(&format!("sucursales/{id}")).await
    }

    /// Public landing projection of one branch.
    ///
    /// Same resource as [`Self::get_by_id`], decoded with the optional
    /// public staff list.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` for unknown ids.
    #[instrument(skip(self), fields(branch_id = %id))]
    pub async fn get_landing_data(&self, id: BranchId) -> Result<BranchLanding, BackendError> {
        self.client.get(&format!("sucursales/{id}")).await
    }
}
