//! Transient notifications shown once after a redirect.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key holding pending toasts.
const TOASTS_KEY: &str = "toasts";

/// Toast severity, also the CSS modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Warning => "toast-warning",
            Self::Error => "toast-error",
        }
    }
}

/// A notification with a title and an optional description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    #[must_use]
    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Warning,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    /// Error raised when the backend rejects a mutation.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::error("Error", "Hubo un problema al guardar los datos.")
        } else {
            Self::error("Error", message)
        }
    }

    /// Warning raised when a form fails local validation.
    #[must_use]
    pub fn incomplete_form() -> Self {
        Self::warning(
            "Formulario incompleto",
            "Por favor completa todos los campos requeridos.",
        )
    }
}

/// Queue a toast for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn push(session: &Session, toast: Toast) -> Result<(), tower_sessions::session::Error> {
    let mut pending: Vec<Toast> = session.get(TOASTS_KEY).await?.unwrap_or_default();
    pending.push(toast);
    session.insert(TOASTS_KEY, pending).await
}

/// Remove and return every pending toast.
///
/// Store failures are logged and yield no toasts; a page never fails to
/// render because of them.
pub async fn take(session: &Session) -> Vec<Toast> {
    match session.remove::<Vec<Toast>>(TOASTS_KEY).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read toasts from session");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_toasts_are_shown_once_in_order() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        push(
            &session,
            Toast::success("Horario creado", "El horario se ha registrado correctamente."),
        )
        .await
        .unwrap();
        push(&session, Toast::incomplete_form()).await.unwrap();

        let shown = take(&session).await;
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].title, "Horario creado");
        assert_eq!(shown[1].kind, ToastKind::Warning);

        assert!(take(&session).await.is_empty());
    }

    #[test]
    fn test_failed_falls_back_to_generic_description() {
        let toast = Toast::failed("  ");
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(
            toast.description.as_deref(),
            Some("Hubo un problema al guardar los datos.")
        );
        assert_eq!(Toast::failed("HTTP 500").description.as_deref(), Some("HTTP 500"));
    }
}
