//! Staff reads and mutations.

use sucursales_core::{BranchId, CreateStaff, Staff, StaffId, UpdateStaff};

use super::{Detail, Family, ListState, QueryClient, QueryKey};
use crate::backend::{BackendError, StaffApi};

const INVALIDATES: &[Family] = &[Family::Staff, Family::Landing];

/// Staff hooks bound to the shared [`QueryClient`].
pub struct StaffQueries<'a> {
    client: &'a QueryClient,
    api: StaffApi,
}

impl<'a> StaffQueries<'a> {
    pub(super) fn new(client: &'a QueryClient) -> Self {
        Self {
            client,
            api: client.backend().staff(),
        }
    }

    pub async fn list(&self) -> ListState<Staff> {
        let api = &self.api;
        ListState::from_result(self.client.query(QueryKey::StaffList, move || api.get_all()).await)
    }

    pub async fn refresh(&self) -> ListState<Staff> {
        self.client.invalidate(&QueryKey::StaffList).await;
        self.list().await
    }

    pub async fn detail(&self, id: Option<StaffId>) -> Detail<Staff> {
        let Some(id) = id else {
            return Detail::Disabled;
        };
        let api = &self.api;
        Detail::from_result(
            self.client
                .query(QueryKey::Staff(id), move || api.get_by_id(id))
                .await,
        )
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn create(&self, branch_id: BranchId, dto: &CreateStaff) -> Result<Staff, BackendError> {
        let staff = self.api.create(branch_id, dto).await?;
        tracing::info!(staff_id = %staff.id, branch_id = %branch_id, "Staff created");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(staff)
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn update(&self, id: StaffId, dto: &UpdateStaff) -> Result<Staff, BackendError> {
        let staff = self.api.update(id, dto).await?;
        tracing::info!(staff_id = %id, "Staff updated");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(staff)
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn delete(&self, id: StaffId) -> Result<(), BackendError> {
        self.api.delete(id).await?;
        tracing::info!(staff_id = %id, "Staff deleted");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn assign_branch(&self, id: StaffId, branch_id: BranchId) -> Result<Staff, BackendError> {
        let staff = self.api.assign_branch(id, branch_id).await?;
        tracing::info!(staff_id = %id, branch_id = %branch_id, "Staff assigned to branch");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(staff)
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn reassign_branch(
        &self,
        id: StaffId,
        new_branch_id: BranchId,
    ) -> Result<Staff, BackendError> {
        let staff = self.api.reassign_branch(id, new_branch_id).await?;
        tracing::info!(staff_id = %id, branch_id = %new_branch_id, "Staff reassigned");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(staff)
    }
}
