//! Query cache shared by every handler.
//!
//! Reads go through [`QueryClient`], which keeps successful results in a
//! `moka` cache for the configured stale time and retries failed reads
//! (never a 404). Mutations go through the same client so that, once the
//! backend confirms a write, every cached read of the affected entity
//! family is invalidated and the next read refetches.
//!
//! # Invalidation contract
//!
//! | Mutation | Invalidated families |
//! |---|---|
//! | branch create/update/toggle/delete | branches, landing |
//! | staff create/update/assign/reassign/delete | staff, landing |
//! | schedule create/update/delete | schedules, landing |
//!
//! Branch, staff and schedule lists are independent families: a branch
//! delete does not drop cached staff lists, matching the backend's own
//! cascade being opaque to the console.

mod branches;
mod schedules;
mod staff;

use std::future::Future;
use std::sync::Arc;

use moka::future::Cache;
use sucursales_core::{Branch, BranchId, BranchLanding, Schedule, ScheduleId, Staff, StaffId};

pub use branches::BranchQueries;
pub use schedules::ScheduleQueries;
pub use staff::StaffQueries;

use crate::backend::{BackendClient, BackendError};
use crate::config::QueryConfig;

/// Cache key for every read the console performs.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum QueryKey {
    Branches,
    Branch(BranchId),
    BranchLanding(BranchId),
    StaffList,
    Staff(StaffId),
    Schedules,
    Schedule(ScheduleId),
    SchedulesByBranch(BranchId),
}

/// Group of keys invalidated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Branches,
    Landing,
    Staff,
    Schedules,
}

impl QueryKey {
    #[must_use]
    pub const fn family(&self) -> Family {
        match self {
            Self::Branches | Self::Branch(_) => Family::Branches,
            Self::BranchLanding(_) => Family::Landing,
            Self::StaffList | Self::Staff(_) => Family::Staff,
            Self::Schedules | Self::Schedule(_) | Self::SchedulesByBranch(_) => Family::Schedules,
        }
    }
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Branches(Arc<Vec<Branch>>),
    Branch(Arc<Branch>),
    Landing(Arc<BranchLanding>),
    StaffList(Arc<Vec<Staff>>),
    Staff(Arc<Staff>),
    Schedules(Arc<Vec<Schedule>>),
    Schedule(Arc<Schedule>),
}

/// Conversion between a fetched value and its [`CacheValue`] variant.
trait Cached: Sized {
    fn wrap(value: Arc<Self>) -> CacheValue;
    fn unwrap(value: CacheValue) -> Option<Arc<Self>>;
}

macro_rules! impl_cached {
    ($ty:ty, $variant:ident) => {
        impl Cached for $ty {
            fn wrap(value: Arc<Self>) -> CacheValue {
                CacheValue::$variant(value)
            }

            fn unwrap(value: CacheValue) -> Option<Arc<Self>> {
                match value {
                    CacheValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_cached!(Vec<Branch>, Branches);
impl_cached!(Branch, Branch);
impl_cached!(BranchLanding, Landing);
impl_cached!(Vec<Staff>, StaffList);
impl_cached!(Staff, Staff);
impl_cached!(Vec<Schedule>, Schedules);
impl_cached!(Schedule, Schedule);

/// Result of a list read.
///
/// A failed read still renders: `items` is empty and `error` carries the
/// message for the banner.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Arc<Vec<T>>,
    pub error: Option<String>,
}

impl<T> ListState<T> {
    fn from_result(result: Result<Arc<Vec<T>>, BackendError>) -> Self {
        match result {
            Ok(items) => Self { items, error: None },
            Err(e) => Self {
                items: Arc::new(Vec::new()),
                error: Some(e.to_string()),
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of a detail read.
#[derive(Debug)]
pub enum Detail<T> {
    /// No id was given; nothing was fetched.
    Disabled,
    Found(Arc<T>),
    NotFound,
    Failed(BackendError),
}

impl<T> Detail<T> {
    fn from_result(result: Result<Arc<T>, BackendError>) -> Self {
        match result {
            Ok(value) => Self::Found(value),
            Err(e) if e.is_not_found() => Self::NotFound,
            Err(e) => Self::Failed(e),
        }
    }

    /// The value, when found.
    #[must_use]
    pub fn found(self) -> Option<Arc<T>> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Shared query cache and mutation entry point.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<QueryClientInner>,
}

struct QueryClientInner {
    backend: BackendClient,
    cache: Cache<QueryKey, CacheValue>,
    retry: u32,
}

impl QueryClient {
    #[must_use]
    pub fn new(backend: BackendClient, config: &QueryConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(config.stale_after)
            .build();

        Self {
            inner: Arc::new(QueryClientInner {
                backend,
                cache,
                retry: config.retry,
            }),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    #[must_use]
    pub fn branches(&self) -> BranchQueries<'_> {
        BranchQueries::new(self)
    }

    #[must_use]
    pub fn staff(&self) -> StaffQueries<'_> {
        StaffQueries::new(self)
    }

    #[must_use]
    pub fn schedules(&self) -> ScheduleQueries<'_> {
        ScheduleQueries::new(self)
    }

    /// Serve `key` from cache or fetch it, retrying failed fetches.
    async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<Arc<T>, BackendError>
    where
        T: Cached,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        if let Some(value) = self.inner.cache.get(&key).await.and_then(T::unwrap) {
            tracing::debug!(key = ?key, "Query cache hit");
            return Ok(value);
        }

        let mut attempt = 0;
        let value = loop {
            match fetch().await {
                Ok(value) => break Arc::new(value),
                Err(e) if !e.is_not_found() && attempt < self.inner.retry => {
                    attempt += 1;
                    tracing::warn!(key = ?key, attempt, error = %e, "Query failed, retrying");
                }
                Err(e) => return Err(e),
            }
        };

        self.inner.cache.insert(key, T::wrap(Arc::clone(&value))).await;
        Ok(value)
    }

    /// Drop one key so the next read refetches.
    pub async fn invalidate(&self, key: &QueryKey) {
        self.inner.cache.invalidate(key).await;
    }

    /// Drop every cached key belonging to any of `families`.
    pub async fn invalidate_families(&self, families: &[Family]) {
        let keys: Vec<QueryKey> = self
            .inner
            .cache
            .iter()
            .filter(|(key, _)| families.contains(&key.family()))
            .map(|(key, _)| QueryKey::clone(&key))
            .collect();

        for key in &keys {
            self.inner.cache.invalidate(key).await;
        }
        tracing::debug!(families = ?families, invalidated = keys.len(), "Query cache invalidated");
    }

    #[cfg(test)]
    async fn contains(&self, key: &QueryKey) -> bool {
        self.inner.cache.get(key).await.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use url::Url;

    use super::*;

    fn client(retry: u32) -> QueryClient {
        let backend = BackendClient::new(Url::parse("http://127.0.0.1:9/").unwrap());
        QueryClient::new(
            backend,
            &QueryConfig {
                stale_after: Duration::from_secs(60),
                capacity: 100,
                retry,
            },
        )
    }

    fn failure() -> BackendError {
        BackendError::Status {
            status: 500,
            message: "boom".to_string(),
        }
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let client = client(1);
        let counter = AtomicU32::new(0);
        let calls = &counter;
        for _ in 0..3 {
            let value: Arc<Vec<Branch>> = client
                .query(QueryKey::Branches, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Vec::new())
                })
                .await
                .unwrap();
            assert!(value.is_empty());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_read_is_retried_once() {
        let client = client(1);
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<Arc<Vec<Staff>>, _> = client
            .query(QueryKey::StaffList, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(failure())
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!client.contains(&QueryKey::StaffList).await);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let client = client(3);
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<Arc<Schedule>, _> = client
            .query(QueryKey::Schedule(ScheduleId::new(9)), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BackendError::NotFound("HTTP 404".to_string()))
            })
            .await;
        assert!(matches!(Detail::from_result(result), Detail::NotFound));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let client = client(1);
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<Arc<Vec<Schedule>>, _> = client
            .query(QueryKey::Schedules, move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(failure())
                } else {
                    Ok(Vec::new())
                }
            })
            .await;
        assert!(result.is_ok());
        assert!(client.contains(&QueryKey::Schedules).await);
    }

    #[tokio::test]
    async fn test_invalidate_families_only_touches_named_families() {
        let client = client(0);
        let ok_branches = || async { Ok(Vec::<Branch>::new()) };
        let ok_schedules = || async { Ok(Vec::<Schedule>::new()) };
        client.query(QueryKey::Branches, ok_branches).await.unwrap();
        client
            .query(QueryKey::SchedulesByBranch(BranchId::new(5)), ok_schedules)
            .await
            .unwrap();
        client.query(QueryKey::Schedules, ok_schedules).await.unwrap();
        client.inner.cache.run_pending_tasks().await;

        client.invalidate_families(&[Family::Schedules]).await;

        assert!(client.contains(&QueryKey::Branches).await);
        assert!(!client.contains(&QueryKey::Schedules).await);
        assert!(
            !client
                .contains(&QueryKey::SchedulesByBranch(BranchId::new(5)))
                .await
        );
    }

    #[test]
    fn test_key_families() {
        assert_eq!(QueryKey::Branch(BranchId::new(1)).family(), Family::Branches);
        assert_eq!(QueryKey::BranchLanding(BranchId::new(1)).family(), Family::Landing);
        assert_eq!(QueryKey::Staff(StaffId::new(1)).family(), Family::Staff);
        assert_eq!(
            QueryKey::SchedulesByBranch(BranchId::new(1)).family(),
            Family::Schedules
        );
    }
}
