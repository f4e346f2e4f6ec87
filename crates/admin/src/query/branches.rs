//! Branch reads and mutations.

use sucursales_core::{Branch, BranchId, BranchLanding, CreateBranch, UpdateBranch};

use super::{Detail, Family, ListState, QueryClient, QueryKey};
use crate::backend::{BackendError, BranchApi};

/// Families dropped after any branch mutation.
const INVALIDATES: &[Family] = &[Family::Branches, Family::Landing];

/// Branch hooks bound to the shared [`QueryClient`].
pub struct BranchQueries<'a> {
    client: &'a QueryClient,
    api: BranchApi,
}

impl<'a> BranchQueries<'a> {
    pub(super) fn new(client: &'a QueryClient) -> Self {
        Self {
            client,
            api: client.backend().branches(),
        }
    }

    pub async fn list(&self) -> ListState<Branch> {
        let api = &self.api;
        ListState::from_result(self.client.query(QueryKey::Branches, move || api.get_all()).await)
    }

    /// Drop the cached list and read it again.
    pub async fn refresh(&self) -> ListState<Branch> {
        self.client.invalidate(&QueryKey::Branches).await;
        self.list().await
    }

    pub async fn detail(&self, id: Option<BranchId>) -> Detail<Branch> {
        let Some(id) = id else {
            return Detail::Disabled;
        };
        let api = &self.api;
        Detail::from_result(
            self.client
                .query(QueryKey::Branch(id), move || api.get_by_id(id))
                .await,
        )
    }

    /// Landing projection, keyed separately from the detail read.
    pub async fn landing(&self, id: Option<BranchId>) -> Detail<BranchLanding> {
        let Some(id) = id else {
            return Detail::Disabled;
        };
        let api = &self.api;
        Detail::from_result(
            self.client
                .query(QueryKey::BranchLanding(id), move || api.get_landing_data(id))
                .await,
        )
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn create(&self, dto: &CreateBranch) -> Result<Branch, BackendError> {
        let branch = self.api.create(dto).await?;
        tracing::info!(branch_id = %branch.id, "Branch created");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(branch)
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn update(&self, id: BranchId, dto: &UpdateBranch) -> Result<Branch, BackendError> {
        let branch = self.api.update(id, dto).await?;
        tracing::info!(branch_id = %id, "Branch updated");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(branch)
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn toggle_active(&self, id: BranchId, active: bool) -> Result<Branch, BackendError> {
        let branch = self.api.toggle_active(id, active).await?;
        tracing::info!(branch_id = %id, active, "Branch status changed");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(branch)
    }

    /// # Errors
    ///
    /// Returns the backend error; the cache is left untouched.
    pub async fn delete(&self, id: BranchId) -> Result<(), BackendError> {
        self.api.delete(id).await?;
        tracing::info!(branch_id = %id, "Branch deleted");
        self.client.invalidate_families(INVALIDATES).await;
        Ok(())
    }
}
