//! CLI command implementations.
//!
//! Commands talk to the backend through the admin crate's REST adapters
//! directly; there is no cache to keep coherent in a one-shot process.

pub mod branches;
pub mod schedules;
pub mod staff;

use sucursales_admin::backend::{BackendClient, BackendError};
use sucursales_admin::config::{ConfigError, parse_backend_url};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Backend URL is not usable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Backend request failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Input rejected before any request was sent.
    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// Build a backend client from `BACKEND_API_URL`.
pub fn backend() -> Result<BackendClient, CommandError> {
    dotenvy::dotenv().ok();

    let raw = std::env::var("BACKEND_API_URL")
        .map_err(|_| CommandError::MissingEnvVar("BACKEND_API_URL"))?;
    let url = parse_backend_url(&raw)?;

    tracing::debug!(backend = %url, "Using backend");
    Ok(BackendClient::new(url))
}
