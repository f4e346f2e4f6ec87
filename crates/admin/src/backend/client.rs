//! Shared HTTP plumbing for the entity adapters.

use std::sync::Arc;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use super::{BackendError, BranchApi, ScheduleApi, StaffApi};

/// Client for the branches REST backend.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    /// Base URL, always ending in `/`.
    base_url: Url,
}

impl BackendClient {
    /// Create a client for `base_url` (expected to end in `/`).
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    #[must_use]
    pub fn branches(&self) -> BranchApi {
        BranchApi::new(self.clone())
    }

    #[must_use]
    pub fn staff(&self) -> StaffApi {
        StaffApi::new(self.clone())
    }

    #[must_use]
    pub fn schedules(&self) -> ScheduleApi {
        ScheduleApi::new(self.clone())
    }

    /// Resolve `path` (no leading slash) against the base URL.
    pub(super) fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, BackendError> {
        let mut url = self.inner.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// `GET` and decode JSON.
    pub(super) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.url(path, &[])?;
        let body = self.send(self.inner.client.get(url)).await?;
        decode(&body)
    }

    /// Send a JSON body and decode the JSON response.
    pub(super) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        let text = self
            .send(self.inner.client.request(method, url).json(body))
            .await?;
        decode(&text)
    }

    /// Bodiless `PUT` with query parameters, decoding the JSON response.
    pub(super) async fn put_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let url = self.url(path, query)?;
        let text = self.send(self.inner.client.put(url)).await?;
        decode(&text)
    }

    /// `DELETE`, ignoring any response body.
    pub(super) async fn delete(&self, path: &str) -> Result<(), BackendError> {
        let url = self.url(path, &[])?;
        self.send(self.inner.client.delete(url)).await.map(|_| ())
    }

    /// Execute the request and return the body of a success response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(BackendError::from_response(status, &text));
        }

        Ok(text)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, BackendError> {
    serde_json::from_str(text).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        BackendError::Parse(e)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        BackendClient::new(Url::parse("http://localhost:8080/api/").unwrap())
    }

    #[test]
    fn test_url_keeps_base_path() {
        let url = client().url("sucursales/3", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/sucursales/3");
    }

    #[test]
    fn test_url_ignores_leading_slash() {
        let url = client().url("/horarios/sucursal/5", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/horarios/sucursal/5");
    }

    #[test]
    fn test_url_encodes_query() {
        let url = client()
            .url("sucursales/3/estado", &[("activa", "false".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/sucursales/3/estado?activa=false"
        );
    }
}
