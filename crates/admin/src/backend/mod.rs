//! REST client for the branches backend.
//!
//! One adapter per entity, all sharing a single [`BackendClient`]:
//!
//! - [`BranchApi`] - `/sucursales`
//! - [`StaffApi`] - `/personal`
//! - [`ScheduleApi`] - `/horarios`
//!
//! Every adapter call is exactly one HTTP request. Retries and caching live
//! in [`crate::query`], not here.

mod branches;
mod client;
mod schedules;
mod staff;

pub use branches::BranchApi;
pub use client::BackendClient;
pub use schedules::ScheduleApi;
pub use staff::StaffApi;

use thiserror::Error;

/// Longest backend body excerpt shown to operators.
const MAX_MESSAGE_CHARS: usize = 200;

/// Errors returned by the backend adapters.
///
/// `Display` is the operator-facing message shown in toasts and banners.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The resource does not exist (HTTP 404).
    #[error("{0}")]
    NotFound(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response.
        message: String,
    },

    /// The request never produced a response.
    #[error("No se pudo conectar con el servidor: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("Respuesta inválida del servidor: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built.
    #[error("URL inválida: {0}")]
    Url(#[from] url::ParseError),
}

impl BackendError {
    /// Whether this is a 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Build the error for a non-success response.
    ///
    /// The message is the JSON `message` (or `error`) field when present,
    /// else the trimmed body text, else `HTTP <status>`.
    #[must_use]
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        if status == reqwest::StatusCode::NOT_FOUND {
            Self::NotFound(message)
        } else {
            Self::Status {
                status: status.as_u16(),
                message,
            }
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        let field = ["message", "error"].iter().find_map(|key| {
            map.get(*key)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        });
        if let Some(message) = field {
            return Some(message.to_owned());
        }
    }

    Some(body.chars().take(MAX_MESSAGE_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn test_message_from_json_field() {
        let err = BackendError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message": "La dirección ya existe", "status": 400}"#,
        );
        assert_eq!(err.to_string(), "La dirección ya existe");
        assert!(matches!(err, BackendError::Status { status: 400, .. }));
    }

    #[test]
    fn test_message_falls_back_to_error_field() {
        let err = BackendError::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "Internal Server Error", "message": ""}"#,
        );
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn test_message_falls_back_to_text_then_status() {
        let err = BackendError::from_response(StatusCode::BAD_GATEWAY, "  upstream down \n");
        assert_eq!(err.to_string(), "upstream down");

        let err = BackendError::from_response(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn test_not_found_is_distinct() {
        let err = BackendError::from_response(StatusCode::NOT_FOUND, "");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(1000);
        let err = BackendError::from_response(StatusCode::BAD_REQUEST, &body);
        assert_eq!(err.to_string().len(), MAX_MESSAGE_CHARS);
    }
}
