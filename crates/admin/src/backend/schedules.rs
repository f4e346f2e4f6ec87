//! `/horarios` adapter.

use reqwest::Method;
use sucursales_core::{BranchId, CreateSchedule, Schedule, ScheduleId, UpdateSchedule};
use tracing::instrument;

use super::{BackendClient, BackendError};

/// Schedule endpoints.
#[derive(Clone)]
pub struct ScheduleApi {
    client: BackendClient,
}

impl ScheduleApi {
    pub(super) const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET /horarios`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Schedule>, BackendError> {
        self.client.get("horarios").await
    }

    /// `GET /horarios/sucursal/{sucursalId}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self), fields(branch_id = %branch_id))]
    pub async fn get_by_branch(&self, branch_id: BranchId) -> Result<Vec<Schedule>, BackendError> {
        self.client.get(&format!("horarios/sucursal/{branch_id}")).await
    }

    /// `GET /horarios/{id}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` for unknown ids.
    #[instrument(skip(self), fields(schedule_id = %id))]
    pub async fn get_by_id(&self, id: ScheduleId) -> Result<Schedule, BackendError> {
        self.client.get(&format!("horarios/{id}")).await
    }

    /// `POST /horarios/{sucursalId}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the schedule.
    #[instrument(skip(self, dto), fields(branch_id = %branch_id))]
    pub async fn create(
        &self,
        branch_id: BranchId,
        dto: &CreateSchedule,
    ) -> Result<Schedule, BackendError> {
        self.client
            .send_json(Method::POST, &format!("horarios/{branch_id}"), dto)
            .await
    }

    /// `PUT /horarios/{id}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the update.
    #[instrument(skip(self, dto), fields(schedule_id = %id))]
    pub async fn update(&self, id: ScheduleId, dto: &UpdateSchedule) -> Result<Schedule, BackendError> {
        self.client
            .send_json(Method::PUT, &format!("horarios/{id}"), dto)
            .await
    }

    /// `DELETE /horarios/{id}`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self), fields(schedule_id = %id))]
    pub async fn delete(&self, id: ScheduleId) -> Result<(), BackendError> {
        self.client.delete(&format!("horarios/{id}")).await
    }
}
