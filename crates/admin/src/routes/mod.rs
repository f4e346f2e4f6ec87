//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness
//! GET  /health/ready                - Backend reachability
//!
//! # Landing (public, read-only)
//! GET  /?sucursal={id}              - Landing shell
//! GET  /landing/contenido           - Landing fragment
//!
//! # Branches
//! GET  /sucursales                  - List shell + create dialog
//! POST /sucursales                  - Create
//! GET  /sucursales/tabla            - Table fragment
//! GET  /sucursales/{id}             - Edit form
//! POST /sucursales/{id}             - Update
//! POST /sucursales/{id}/estado      - Toggle active
//! POST /sucursales/{id}/eliminar    - Delete (confirmed)
//!
//! # Staff
//! GET  /personal                    - List shell
//! POST /personal                    - Create
//! GET  /personal/tabla              - Table fragment
//! GET  /personal/nuevo              - Create form
//! GET  /personal/{id}               - Edit form
//! POST /personal/{id}               - Update
//! POST /personal/{id}/asignar       - Assign branch
//! POST /personal/{id}/reasignar     - Reassign branch
//! POST /personal/{id}/eliminar      - Delete (confirmed)
//!
//! # Schedules
//! GET  /horarios                    - List shell
//! POST /horarios                    - Create
//! GET  /horarios/tabla              - Table fragment
//! GET  /horarios/nuevo              - Create form
//! GET  /horarios/duracion           - Duration preview fragment
//! GET  /horarios/{id}               - Edit form
//! POST /horarios/{id}               - Update
//! POST /horarios/{id}/eliminar      - Delete (confirmed)
//! ```

pub mod branches;
pub mod health;
pub mod landing;
pub mod layout;
pub mod schedules;
pub mod staff;

use askama::Template;
use axum::{
    Router,
    http::HeaderMap,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::services::ServeDir;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Build all console routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing
        .route("/", get(landing::index))
        .route("/landing/contenido", get(landing::content))
        // Branches
        .route("/sucursales", get(branches::index).post(branches::create))
        .route("/sucursales/tabla", get(branches::table))
        .route("/sucursales/{id}", get(branches::edit).post(branches::update))
        .route("/sucursales/{id}/estado", post(branches::toggle))
        .route("/sucursales/{id}/eliminar", post(branches::delete))
        // Staff
        .route("/personal", get(staff::index).post(staff::create))
        .route("/personal/tabla", get(staff::table))
        .route("/personal/nuevo", get(staff::new))
        .route("/personal/{id}", get(staff::edit).post(staff::update))
        .route("/personal/{id}/asignar", post(staff::assign))
        .route("/personal/{id}/reasignar", post(staff::reassign))
        .route("/personal/{id}/eliminar", post(staff::delete))
        // Schedules
        .route("/horarios", get(schedules::index).post(schedules::create))
        .route("/horarios/tabla", get(schedules::table))
        .route("/horarios/nuevo", get(schedules::new))
        .route("/horarios/duracion", get(schedules::duration))
        .route("/horarios/{id}", get(schedules::edit).post(schedules::update))
        .route("/horarios/{id}/eliminar", post(schedules::delete))
}

/// The console application: routes, health checks, static assets and
/// sessions. Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .layer(session_layer)
        .with_state(state)
}

/// Render a page template, logging render failures.
pub(crate) fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Whether the request was issued by htmx.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("HX-Request")
}

/// Table fragment query; `recargar=true` drops the cached list first.
#[derive(Debug, Default, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub recargar: bool,
}

/// Delete confirmation posted by the dialogs.
///
/// Missing or `false` means the operator did not confirm; no delete is
/// issued.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub confirmado: bool,
}
