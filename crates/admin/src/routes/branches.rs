//! Branch (sucursal) route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sucursales_core::{Branch, BranchId, forms::{BranchForm, FieldErrors}};
use tower_sessions::Session;
use tracing::instrument;

use super::layout::Chrome;
use super::schedules::ScheduleRow;
use super::{ConfirmForm, TableQuery, is_htmx, render};
use crate::components::data_table::{branch_columns, schedule_columns};
use crate::components::{TableBody, TableColumn, Toast, toast};
use crate::error::AppError;
use crate::filters;
use crate::query::Detail;
use crate::state::AppState;

const LIST_PATH: &str = "/sucursales";
const EMPTY: &str = "No hay sucursales registradas";

/// Branch view for the table.
#[derive(Debug, Clone)]
pub struct BranchRow {
    pub id: BranchId,
    pub address: String,
    pub phone: String,
    pub latitude: String,
    pub longitude: String,
    pub contacts: String,
    pub has_contacts: bool,
    pub active: bool,
    pub status: &'static str,
}

impl From<&Branch> for BranchRow {
    fn from(branch: &Branch) -> Self {
        let count = branch.contact_numbers.len();
        Self {
            id: branch.id,
            address: branch.address.clone(),
            phone: branch.phone.clone(),
            latitude: format!("Lat: {:.4}", branch.latitude),
            longitude: format!("Lng: {:.4}", branch.longitude),
            contacts: if count == 0 {
                "Sin contactos".to_string()
            } else {
                format!("{count} contactos")
            },
            has_contacts: count > 0,
            active: branch.active,
            status: status_label(branch.active),
        }
    }
}

const fn status_label(active: bool) -> &'static str {
    if active { "Activa" } else { "Inactiva" }
}

/// Branch list shell with the create dialog.
#[derive(Template)]
#[template(path = "sucursales/index.html")]
pub struct BranchesIndexTemplate {
    pub chrome: Chrome,
    pub form: BranchForm,
    pub errors: FieldErrors,
    pub error: Option<String>,
    /// Open the create dialog on load (re-render after a failed create).
    pub dialog_open: bool,
}

/// Branch table fragment.
#[derive(Template, WebTemplate)]
#[template(path = "sucursales/_table.html")]
pub struct BranchTableTemplate {
    pub columns: Vec<TableColumn>,
    pub body: TableBody<BranchRow>,
    pub flash: Option<Toast>,
}

/// Branch edit page.
#[derive(Template)]
#[template(path = "sucursales/edit.html")]
pub struct BranchEditTemplate {
    pub chrome: Chrome,
    pub id: BranchId,
    pub active: bool,
    pub form: BranchForm,
    pub errors: FieldErrors,
    pub error: Option<String>,
    pub schedule_columns: Vec<TableColumn>,
    pub schedules: TableBody<ScheduleRow>,
}

/// Shown when a detail read finds nothing.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub chrome: Chrome,
    pub title: &'static str,
    pub back_href: &'static str,
}

/// Target state posted by the status button.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub activa: bool,
}

/// Branch list page handler.
#[instrument(skip(session))]
pub async fn index(session: Session) -> Html<String> {
    let template = BranchesIndexTemplate {
        chrome: Chrome::load(&session, LIST_PATH).await,
        form: BranchForm::default(),
        errors: FieldErrors::new(),
        error: None,
        dialog_open: false,
    };

    render(&template)
}

async fn table_fragment(state: &AppState, reload: bool, flash: Option<Toast>) -> BranchTableTemplate {
    let queries = state.queries().branches();
    let list = if reload {
        queries.refresh().await
    } else {
        queries.list().await
    };
    BranchTableTemplate {
        columns: branch_columns(),
        body: TableBody::from_list(&list.items, list.error, EMPTY, |branch| {
            BranchRow::from(branch)
        }),
        flash,
    }
}

/// Branch table fragment handler.
#[instrument(skip(state))]
pub async fn table(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> BranchTableTemplate {
    table_fragment(&state, query.recargar, None).await
}

/// Create branch handler (dialog on the list page).
#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<BranchForm>,
) -> Result<Response, AppError> {
    let dto = match form.to_create() {
        Ok(dto) => dto,
        Err(errors) => {
            let template = BranchesIndexTemplate {
                chrome: Chrome::load(&session, LIST_PATH)
                    .await
                    .with_toast(Toast::incomplete_form()),
                form,
                errors,
                error: None,
                dialog_open: true,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response());
        }
    };

    match state.queries().branches().create(&dto).await {
        Ok(_) => {
            toast::push(
                &session,
                Toast::success("Sucursal creada", "La sucursal se ha registrado correctamente."),
            )
            .await?;
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            tracing::error!(address = %dto.address, error = %e, "Failed to create branch");
            let template = BranchesIndexTemplate {
                chrome: Chrome::load(&session, LIST_PATH)
                    .await
                    .with_toast(Toast::failed(e.to_string())),
                form,
                errors: FieldErrors::new(),
                error: Some(e.to_string()),
                dialog_open: true,
            };
            Ok(render(&template).into_response())
        }
    }
}

async fn schedule_rows(state: &AppState, id: BranchId, address: &str) -> TableBody<ScheduleRow> {
    let list = state.queries().schedules().by_branch(id).await;
    TableBody::from_list(
        &list.items,
        list.error,
        "No hay horarios registrados",
        |schedule| ScheduleRow::new(schedule, Some(address)),
    )
}

async fn not_found(session: &Session) -> Response {
    let template = NotFoundTemplate {
        chrome: Chrome::load(session, LIST_PATH).await,
        title: "Sucursal no encontrada",
        back_href: LIST_PATH,
    };
    (StatusCode::NOT_FOUND, render(&template)).into_response()
}

/// Edit branch page handler.
#[instrument(skip(state, session))]
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<BranchId>,
) -> Result<Response, AppError> {
    let branch = match state.queries().branches().detail(Some(id)).await {
        Detail::Found(branch) => branch,
        Detail::NotFound | Detail::Disabled => return Ok(not_found(&session).await),
        Detail::Failed(e) => return Err(AppError::Backend(e)),
    };

    let template = BranchEditTemplate {
        chrome: Chrome::load(&session, LIST_PATH).await,
        id,
        active: branch.active,
        form: BranchForm::from_branch(&branch),
        errors: FieldErrors::new(),
        error: None,
        schedule_columns: schedule_columns(),
        schedules: schedule_rows(&state, id, &branch.address).await,
    };

    Ok(render(&template).into_response())
}

/// Update branch handler.
#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<BranchId>,
    Form(form): Form<BranchForm>,
) -> Result<Response, AppError> {
    let (errors, chrome, error, status) = match form.to_update() {
        Err(errors) => (
            errors,
            Chrome::load(&session, LIST_PATH)
                .await
                .with_toast(Toast::incomplete_form()),
            None,
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        Ok(dto) => match state.queries().branches().update(id, &dto).await {
            Ok(_) => {
                toast::push(
                    &session,
                    Toast::success(
                        "Sucursal actualizada",
                        "Los datos se han actualizado correctamente.",
                    ),
                )
                .await?;
                return Ok(Redirect::to(LIST_PATH).into_response());
            }
            Err(e) => {
                tracing::error!(branch_id = %id, error = %e, "Failed to update branch");
                (
                    FieldErrors::new(),
                    Chrome::load(&session, LIST_PATH)
                        .await
                        .with_toast(Toast::failed(e.to_string())),
                    Some(e.to_string()),
                    StatusCode::OK,
                )
            }
        },
    };

    let active = state
        .queries()
        .branches()
        .detail(Some(id))
        .await
        .found()
        .is_some_and(|branch| branch.active);

    let template = BranchEditTemplate {
        chrome,
        id,
        active,
        schedule_columns: schedule_columns(),
        schedules: schedule_rows(&state, id, &form.address).await,
        form,
        errors,
        error,
    };

    Ok((status, render(&template)).into_response())
}

/// Toggle branch active status.
///
/// htmx requests get the refreshed table fragment with an inline notice;
/// plain form posts get a toast and a redirect to the list.
#[instrument(skip(state, session, headers))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<BranchId>,
    Form(form): Form<ToggleForm>,
) -> Result<Response, AppError> {
    let result = state
        .queries()
        .branches()
        .toggle_active(id, form.activa)
        .await;

    let (notice, trigger) = match &result {
        Ok(branch) => (
            Toast::success(
                "Estado actualizado",
                format!("La sucursal ahora está {}.", status_label(branch.active)),
            ),
            "branch-status-changed",
        ),
        Err(e) => {
            tracing::error!(branch_id = %id, active = form.activa, error = %e, "Failed to change branch status");
            (Toast::failed(e.to_string()), "branch-status-error")
        }
    };

    if is_htmx(&headers) {
        let fragment = table_fragment(&state, false, Some(notice)).await;
        return Ok(([("HX-Trigger", trigger)], fragment).into_response());
    }

    toast::push(&session, notice).await?;
    Ok(Redirect::to(LIST_PATH).into_response())
}

/// Delete branch handler.
///
/// Without `confirmado=true` nothing is sent to the backend.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<BranchId>,
    Form(confirm): Form<ConfirmForm>,
) -> Result<Redirect, AppError> {
    if !confirm.confirmado {
        tracing::debug!(branch_id = %id, "Branch delete not confirmed");
        return Ok(Redirect::to(LIST_PATH));
    }

    let notice = match state.queries().branches().delete(id).await {
        Ok(()) => Toast::success(
            "Sucursal eliminada",
            "La sucursal se ha eliminado correctamente.",
        ),
        Err(e) => {
            tracing::error!(branch_id = %id, error = %e, "Failed to delete branch");
            Toast::failed(e.to_string())
        }
    };
    toast::push(&session, notice).await?;

    Ok(Redirect::to(LIST_PATH))
}
