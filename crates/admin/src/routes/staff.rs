//! Staff (personal) route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sucursales_core::{
    BranchDirectory, BranchId, Staff, StaffId,
    forms::{FieldErrors, FormMode, StaffForm},
};
use tower_sessions::Session;
use tracing::instrument;

use super::branches::NotFoundTemplate;
use super::layout::Chrome;
use super::{ConfirmForm, TableQuery, render};
use crate::components::data_table::staff_columns;
use crate::components::{BranchOption, TableBody, TableColumn, Toast, branch_options, toast};
use crate::error::AppError;
use crate::filters;
use crate::query::Detail;
use crate::state::AppState;

const LIST_PATH: &str = "/personal";
const EMPTY: &str = "No hay personal registrado";

/// Staff view for the table.
#[derive(Debug, Clone)]
pub struct StaffRow {
    pub id: StaffId,
    pub full_name: String,
    pub email: String,
    pub phones: String,
    pub corporate_number: String,
    pub branch: String,
}

impl StaffRow {
    #[must_use]
    pub fn new(staff: &Staff, branch_address: Option<&str>) -> Self {
        Self {
            id: staff.id,
            full_name: staff.full_name.clone(),
            email: staff.email.clone(),
            phones: if staff.phone_numbers.is_empty() {
                "Sin teléfonos".to_string()
            } else {
                staff.phone_numbers.join(", ")
            },
            corporate_number: staff
                .corporate_number
                .clone()
                .unwrap_or_else(|| "—".to_string()),
            branch: branch_address.unwrap_or("Sin sucursal").to_string(),
        }
    }
}

/// Staff list shell with the delete confirmation dialog.
#[derive(Template)]
#[template(path = "personal/index.html")]
pub struct StaffIndexTemplate {
    pub chrome: Chrome,
}

/// Staff table fragment.
#[derive(Template, WebTemplate)]
#[template(path = "personal/_table.html")]
pub struct StaffTableTemplate {
    pub columns: Vec<TableColumn>,
    pub body: TableBody<StaffRow>,
}

/// Branch membership action offered on the edit page.
#[derive(Debug, Clone)]
pub struct MembershipView {
    /// `asignar` or `reasignar`.
    pub action: String,
    pub title: &'static str,
    pub current_branch: Option<String>,
    pub options: Vec<BranchOption>,
}

/// Staff create/edit form.
#[derive(Template)]
#[template(path = "personal/form.html")]
pub struct StaffFormTemplate {
    pub chrome: Chrome,
    pub mode: FormMode,
    pub action: String,
    pub form: StaffForm,
    pub errors: FieldErrors,
    pub error: Option<String>,
    pub branches: Vec<BranchOption>,
    pub branches_error: Option<String>,
    /// Assign/reassign section, edit mode only.
    pub membership: Option<MembershipView>,
}

/// Branch picked in the assign/reassign section.
#[derive(Debug, Deserialize)]
pub struct MembershipForm {
    #[serde(rename = "sucursalId", default)]
    pub branch_id: String,
}

/// Preselected branch for the create form (`/personal/nuevo?sucursal=5`).
#[derive(Debug, Deserialize)]
pub struct NewStaffQuery {
    pub sucursal: Option<BranchId>,
}

struct FormPage {
    mode: FormMode,
    id: Option<StaffId>,
    form: StaffForm,
    errors: FieldErrors,
    error: Option<String>,
}

impl FormPage {
    fn create(form: StaffForm) -> Self {
        Self {
            mode: FormMode::Create,
            id: None,
            form,
            errors: FieldErrors::new(),
            error: None,
        }
    }

    fn edit(id: StaffId, form: StaffForm) -> Self {
        Self {
            mode: FormMode::Edit,
            id: Some(id),
            form,
            errors: FieldErrors::new(),
            error: None,
        }
    }

    async fn render(self, state: &AppState, chrome: Chrome) -> Html<String> {
        let branches = state.queries().branches().list().await;
        let selected = self.form.selected_branch();

        let membership = self.id.map(|id| {
            let directory = BranchDirectory::new(&branches.items);
            let current_branch = selected
                .and_then(|b| directory.get(b))
                .map(|b| b.address.clone());
            let (action, title) = if selected.is_some() {
                ("reasignar", "Reasignar sucursal")
            } else {
                ("asignar", "Asignar sucursal")
            };
            MembershipView {
                action: format!("{LIST_PATH}/{id}/{action}"),
                title,
                current_branch,
                options: branch_options(&branches.items, None),
            }
        });

        let template = StaffFormTemplate {
            chrome,
            mode: self.mode,
            action: self
                .id
                .map_or_else(|| LIST_PATH.to_string(), |id| format!("{LIST_PATH}/{id}")),
            branches: branch_options(&branches.items, selected),
            branches_error: branches.error,
            membership,
            form: self.form,
            errors: self.errors,
            error: self.error,
        };

        render(&template)
    }
}

/// Staff list page handler.
#[instrument(skip(session))]
pub async fn index(session: Session) -> Html<String> {
    let template = StaffIndexTemplate {
        chrome: Chrome::load(&session, LIST_PATH).await,
    };

    render(&template)
}

/// Staff table fragment handler.
#[instrument(skip(state))]
pub async fn table(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> StaffTableTemplate {
    let (staff_queries, branch_queries) = (state.queries().staff(), state.queries().branches());
    let staff = async {
        if query.recargar {
            staff_queries.refresh().await
        } else {
            staff_queries.list().await
        }
    };
    let (staff, branches) = tokio::join!(staff, branch_queries.list());
    let directory = BranchDirectory::new(&branches.items);

    StaffTableTemplate {
        columns: staff_columns(),
        body: TableBody::from_list(&staff.items, staff.error, EMPTY, |member| {
            StaffRow::new(member, directory.staff_branch_address(member))
        }),
    }
}

/// New staff form handler.
#[instrument(skip(state, session))]
pub async fn new(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NewStaffQuery>,
) -> Html<String> {
    let form = StaffForm {
        branch_id: query.sucursal.map(|id| id.to_string()).unwrap_or_default(),
        ..StaffForm::default()
    };

    FormPage::create(form)
        .render(&state, Chrome::load(&session, LIST_PATH).await)
        .await
}

/// Create staff handler.
#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<StaffForm>,
) -> Result<Response, AppError> {
    let dto = match form.to_create() {
        Ok(dto) => dto,
        Err(errors) => {
            let chrome = Chrome::load(&session, LIST_PATH)
                .await
                .with_toast(Toast::incomplete_form());
            let page = FormPage {
                errors,
                ..FormPage::create(form)
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page.render(&state, chrome).await).into_response());
        }
    };

    match state.queries().staff().create(dto.branch_id, &dto).await {
        Ok(_) => {
            toast::push(
                &session,
                Toast::success("Personal creado", "El personal se ha registrado correctamente."),
            )
            .await?;
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            tracing::error!(branch_id = %dto.branch_id, error = %e, "Failed to create staff");
            let chrome = Chrome::load(&session, LIST_PATH)
                .await
                .with_toast(Toast::failed(e.to_string()));
            let page = FormPage {
                error: Some(e.to_string()),
                ..FormPage::create(form)
            };
            Ok(page.render(&state, chrome).await.into_response())
        }
    }
}

async fn not_found(session: &Session) -> Response {
    let template = NotFoundTemplate {
        chrome: Chrome::load(session, LIST_PATH).await,
        title: "Personal no encontrado",
        back_href: LIST_PATH,
    };
    (StatusCode::NOT_FOUND, render(&template)).into_response()
}

/// Edit staff form handler.
#[instrument(skip(state, session))]
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StaffId>,
) -> Result<Response, AppError> {
    let staff = match state.queries().staff().detail(Some(id)).await {
        Detail::Found(staff) => staff,
        Detail::NotFound | Detail::Disabled => return Ok(not_found(&session).await),
        Detail::Failed(e) => return Err(AppError::Backend(e)),
    };

    let page = FormPage::edit(id, StaffForm::from_staff(&staff));
    Ok(page
        .render(&state, Chrome::load(&session, LIST_PATH).await)
        .await
        .into_response())
}

/// Update staff handler. The branch is changed through assign/reassign only.
#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StaffId>,
    Form(mut form): Form<StaffForm>,
) -> Result<Response, AppError> {
    if form.branch_id.is_empty()
        && let Some(staff) = state.queries().staff().detail(Some(id)).await.found()
    {
        form.branch_id = staff
            .effective_branch_id()
            .map(|b| b.to_string())
            .unwrap_or_default();
    }

    let dto = match form.to_update() {
        Ok(dto) => dto,
        Err(errors) => {
            let chrome = Chrome::load(&session, LIST_PATH)
                .await
                .with_toast(Toast::incomplete_form());
            let page = FormPage {
                errors,
                ..FormPage::edit(id, form)
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page.render(&state, chrome).await).into_response());
        }
    };

    match state.queries().staff().update(id, &dto).await {
        Ok(_) => {
            toast::push(
                &session,
                Toast::success(
                    "Personal actualizado",
                    "Los datos se han actualizado correctamente.",
                ),
            )
            .await?;
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            tracing::error!(staff_id = %id, error = %e, "Failed to update staff");
            let chrome = Chrome::load(&session, LIST_PATH)
                .await
                .with_toast(Toast::failed(e.to_string()));
            let page = FormPage {
                error: Some(e.to_string()),
                ..FormPage::edit(id, form)
            };
            Ok(page.render(&state, chrome).await.into_response())
        }
    }
}

/// Assign a branch to staff without one.
#[instrument(skip(state, session))]
pub async fn assign(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StaffId>,
    Form(form): Form<MembershipForm>,
) -> Result<Redirect, AppError> {
    change_branch(&state, &session, id, &form, false).await
}

/// Move staff to another branch. The backend clears the corporate number.
#[instrument(skip(state, session))]
pub async fn reassign(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StaffId>,
    Form(form): Form<MembershipForm>,
) -> Result<Redirect, AppError> {
    change_branch(&state, &session, id, &form, true).await
}

async fn change_branch(
    state: &AppState,
    session: &Session,
    id: StaffId,
    form: &MembershipForm,
    reassign: bool,
) -> Result<Redirect, AppError> {
    let edit_path = format!("{LIST_PATH}/{id}");

    let Ok(branch_id) = form.branch_id.trim().parse::<BranchId>() else {
        toast::push(
            session,
            Toast::warning("Formulario incompleto", "Selecciona una sucursal."),
        )
        .await?;
        return Ok(Redirect::to(&edit_path));
    };

    let queries = state.queries().staff();
    let result = if reassign {
        queries.reassign_branch(id, branch_id).await
    } else {
        queries.assign_branch(id, branch_id).await
    };

    match result {
        Ok(_) => {
            toast::push(
                session,
                Toast::success(
                    "Sucursal asignada",
                    "El personal se ha asignado a la sucursal correctamente.",
                ),
            )
            .await?;
            Ok(Redirect::to(LIST_PATH))
        }
        Err(e) => {
            tracing::error!(staff_id = %id, branch_id = %branch_id, reassign, error = %e, "Failed to change staff branch");
            toast::push(session, Toast::failed(e.to_string())).await?;
            Ok(Redirect::to(&edit_path))
        }
    }
}

/// Delete staff handler.
///
/// The list's modal posts `confirmado=true`; anything else is a no-op.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StaffId>,
    Form(confirm): Form<ConfirmForm>,
) -> Result<Redirect, AppError> {
    if !confirm.confirmado {
        tracing::debug!(staff_id = %id, "Staff delete not confirmed");
        return Ok(Redirect::to(LIST_PATH));
    }

    let notice = match state.queries().staff().delete(id).await {
        Ok(()) => Toast::success("Personal eliminado", "El personal se ha eliminado correctamente."),
        Err(e) => {
            tracing::error!(staff_id = %id, error = %e, "Failed to delete staff");
            Toast::failed(e.to_string())
        }
    };
    toast::push(&session, notice).await?;

    Ok(Redirect::to(LIST_PATH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn staff(phones: &[&str], corporate: Option<&str>) -> Staff {
        serde_json::from_value(serde_json::json!({
            "id": 8,
            "nombreCompleto": "Ana Rojas",
            "correoInstitucional": "ana@empresa.com",
            "numerosTelefono": phones,
            "numeroCorporativo": corporate,
            "sucursalId": 5,
        }))
        .unwrap()
    }

    #[test]
    fn test_row_fallbacks() {
        let row = StaffRow::new(&staff(&[], None), None);
        assert_eq!(row.phones, "Sin teléfonos");
        assert_eq!(row.branch, "Sin sucursal");
        assert_eq!(row.corporate_number, "—");
    }

    #[test]
    fn test_row_joins_phones() {
        let row = StaffRow::new(&staff(&["5551234", "5559876"], Some("100")), Some("Norte 1"));
        assert_eq!(row.phones, "5551234, 5559876");
        assert_eq!(row.corporate_number, "100");
        assert_eq!(row.branch, "Norte 1");
    }

    #[test]
    fn test_table_renders_empty_state() {
        let template = StaffTableTemplate {
            columns: staff_columns(),
            body: TableBody::Empty(EMPTY),
        };
        assert!(template.render().unwrap().contains(EMPTY));
    }
}
