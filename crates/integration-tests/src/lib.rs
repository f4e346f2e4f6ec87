//! Integration tests for Sucursales.
//!
//! Each test starts its own in-memory [`FakeBackend`] and a real admin
//! router on ephemeral ports, then drives the console over HTTP with a
//! cookie-keeping client, the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sucursales-integration-tests
//! ```

pub mod fake_backend;

pub use fake_backend::{FakeBackend, RecordedRequest};

use reqwest::{Client, StatusCode};
use sucursales_admin::config::{AdminConfig, parse_backend_url};
use sucursales_admin::routes;
use sucursales_admin::state::AppState;

/// A running console wired to a fresh fake backend.
pub struct TestContext {
    pub client: Client,
    pub admin_url: String,
    pub backend: FakeBackend,
}

impl TestContext {
    /// Start with an empty backend.
    pub async fn start() -> Self {
        Self::with_backend(FakeBackend::new()).await
    }

    /// Start against an already seeded backend.
    ///
    /// # Panics
    ///
    /// Panics if a server cannot be bound or the client cannot be built.
    pub async fn with_backend(backend: FakeBackend) -> Self {
        let backend_url = parse_backend_url(&backend.spawn().await).expect("Invalid backend URL");
        let app = routes::app(AppState::new(AdminConfig::with_backend(backend_url)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind admin");
        let addr = listener.local_addr().expect("Admin has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            admin_url: format!("http://{addr}"),
            backend,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// `GET` a console page and return status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails at the transport level.
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed");
        let status = response.status();
        (status, response.text().await.expect("Failed to read body"))
    }

    /// `POST` a form, following the redirect like a browser.
    ///
    /// # Panics
    ///
    /// Panics if the request fails at the transport level.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed");
        let status = response.status();
        (status, response.text().await.expect("Failed to read body"))
    }
}
