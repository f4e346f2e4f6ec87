//! Schedule reads and mutations.

use sucursales_core::{BranchId, CreateSchedule, Schedule, ScheduleId, UpdateSchedule};

use super::{Detail, Family, ListState, QueryClient, QueryKey};
use crate::backend::{BackendError, ScheduleApi};

const INVALIDATES: &[Family] = &[Family::Schedules, Family::Landing];

/// Schedule hooks bound to the shared [`QueryClient`].
pub struct ScheduleQueries<'a> {
    client: &'a QueryClient,
    api: ScheduleApi,
}

impl<'a> ScheduleQueries<'a> {
    pub(super) fn new(client: &'a QueryClient) -> Self {
        Self {
            client,
            api: client.backend().schedules(),
        }
    }

    pub async fn list(&self) -> ListState<Schedule> {
        let api = &self.api;
        ListState::from_result(self.client.query(QueryKey::Schedules, move || api.get_all()).await)
    }

    pub async fn refresh(&self) -> ListState<Schedule> {
        self.client.invalidate(&QueryKey::Schedules).await;
        self.list().await
    }

    /// Schedules of one branch.
    pub async fn by_branch(&self, branch_id: BranchId) -> ListState<Schedule> {
        let api = &self.api;
        ListState::from_result(
            self.client
                .query(QueryKey::SchedulesByBranch(branch_id), move || {
                    api.get_by_branch(branch_id)
                })
                .await,
        )
    }

    pub async fn detail(&self, id: Option<ScheduleId>) -> Detail<Schedule> {
        let Some(id) = id else {
            return Detail::Disabled;
        };
        let api = &self.api;
        Detail::from_result(
            self.client
                .query(QueryKey::Schedule(id), move || api.get_by_id(id))
                .await,
        )
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn create(
        &self,
        branch_id: BranchId,
        dto: &CreateSchedule,
    ) -> Result<Schedule, BackendError> {
        let schedule = self.api.create(branch_id, dto).await?;
        tracing::info!(schedule_id = %schedule.id, branch_id = %branch_id, "Schedule created");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(schedule)
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn update(&self, id: ScheduleId, dto: &UpdateSchedule) -> Result<Schedule, BackendError> {
        let schedule = self.api.update(id, dto).await?;
        tracing::info!(schedule_id = %id, "Schedule updated");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(schedule)
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn delete(&self, id: ScheduleId) -> Result<(), BackendError> {
        self.api.delete(id).await?;
        tracing::info!(schedule_id = %id, "Schedule deleted");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(())
    }
}
