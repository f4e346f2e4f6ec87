//! Schedule (horario) route handlers.

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
    BranchDirectory, BranchId, Schedule, ScheduleId,
    forms::{FieldErrors, FormMode, ScheduleForm},
};
use tower_sessions::Session;
use tracing::instrument;

use super::branches::NotFoundTemplate;
use super::layout::Chrome;
use super::{ConfirmForm, TableQuery, render};
use crate::components::data_table::schedule_columns;
use crate::components::{
    BranchOption, TableBody, TableColumn, Toast, WeekdayOption, branch_options, toast,
    weekday_options,
};
use crate::error::AppError;
use crate::filters;
use crate::query::Detail;
use crate::state::AppState;

const LIST_PATH: &str = "/horarios";
const EMPTY: &str = "No hay horarios registrados";

/// Schedule view for tables.
#[derive(Debug, Clone)]
pub struct ScheduleRow {
    pub id: ScheduleId,
    pub day: &'static str,
    pub chip_class: &'static str,
    pub range: String,
    pub duration: String,
    pub branch: String,
}

impl ScheduleRow {
    #[must_use]
    pub fn new(schedule: &Schedule, branch_address: Option<&str>) -> Self {
        Self {
            id: schedule.id,
            day: schedule.weekday.label(),
            chip_class: schedule.weekday.chip_class(),
            range: schedule.time_range(),
            duration: schedule
                .duration_label()
                .unwrap_or_else(|_| "Horario inválido".to_string()),
            branch: branch_address.unwrap_or("Sin sucursal").to_string(),
        }
    }
}

/// Live duration preview state.
#[derive(Debug, Clone, Default)]
pub struct DurationView {
    pub label: Option<String>,
    pub error: Option<String>,
}

impl From<&ScheduleForm> for DurationView {
    fn from(form: &ScheduleForm) -> Self {
        match form.duration_preview() {
            None => Self::default(),
            Some(Ok(label)) => Self {
                label: Some(label),
                error: None,
            },
            Some(Err(e)) => Self {
                label: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Schedule list shell with the delete confirmation dialog.
#[derive(Template)]
#[template(path = "horarios/index.html")]
pub struct SchedulesIndexTemplate {
    pub chrome: Chrome,
}

/// Schedule table fragment.
#[derive(Template, WebTemplate)]
#[template(path = "horarios/_table.html")]
pub struct ScheduleTableTemplate {
    pub columns: Vec<TableColumn>,
    pub body: TableBody<ScheduleRow>,
}

/// Duration preview fragment.
#[derive(Template, WebTemplate)]
#[template(path = "horarios/_duration.html")]
pub struct DurationTemplate {
    pub duration: DurationView,
}

/// Schedule create/edit form.
#[derive(Template)]
#[template(path = "horarios/form.html")]
pub struct ScheduleFormTemplate {
    pub chrome: Chrome,
    pub mode: FormMode,
    pub action: String,
    pub form: ScheduleForm,
    pub errors: FieldErrors,
    pub error: Option<String>,
    pub weekdays: Vec<WeekdayOption>,
    pub branches: Vec<BranchOption>,
    pub branches_error: Option<String>,
    pub duration: DurationView,
}

/// Preselected branch for the create form (`/horarios/nuevo?sucursal=5`).
#[derive(Debug, Deserialize)]
pub struct NewScheduleQuery {
    pub sucursal: Option<BranchId>,
}

impl ScheduleFormTemplate {
    async fn build(
        state: &AppState,
        chrome: Chrome,
        mode: FormMode,
        action: String,
        form: ScheduleForm,
        errors: FieldErrors,
        error: Option<String>,
    ) -> Self {
        let branches = state.queries().branches().list().await;
        Self {
            chrome,
            mode,
            action,
            weekdays: weekday_options(form.selected_weekday()),
            branches: branch_options(&branches.items, form.selected_branch()),
            branches_error: branches.error,
            duration: DurationView::from(&form),
            form,
            errors,
            error,
        }
    }
}

/// Schedule list page handler.
#[instrument(skip(session))]
pub async fn index(session: Session) -> Html<String> {
    let template = SchedulesIndexTemplate {
        chrome: Chrome::load(&session, LIST_PATH).await,
    };

    render(&template)
}

/// Schedule table fragment handler.
#[instrument(skip(state))]
pub async fn table(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> ScheduleTableTemplate {
    let (schedule_queries, branch_queries) = (state.queries().schedules(), state.queries().branches());
    let schedules = async {
        if query.recargar {
            schedule_queries.refresh().await
        } else {
            schedule_queries.list().await
        }
    };
    let (schedules, branches) = tokio::join!(schedules, branch_queries.list());
    let directory = BranchDirectory::new(&branches.items);

    ScheduleTableTemplate {
        columns: schedule_columns(),
        body: TableBody::from_list(&schedules.items, schedules.error, EMPTY, |schedule| {
            ScheduleRow::new(schedule, directory.schedule_branch_address(schedule))
        }),
    }
}

/// New schedule form handler.
#[instrument(skip(state, session))]
pub async fn new(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NewScheduleQuery>,
) -> Html<String> {
    let form = ScheduleForm {
        branch_id: query.sucursal.map(|id| id.to_string()).unwrap_or_default(),
        ..ScheduleForm::default()
    };
    let template = ScheduleFormTemplate::build(
        &state,
        Chrome::load(&session, LIST_PATH).await,
        FormMode::Create,
        LIST_PATH.to_string(),
        form,
        FieldErrors::new(),
        None,
    )
    .await;

    render(&template)
}

/// Create schedule handler.
#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ScheduleForm>,
) -> Result<Response, AppError> {
    let dto = match form.to_create() {
        Ok(dto) => dto,
        Err(errors) => {
            let chrome = Chrome::load(&session, LIST_PATH)
                .await
                .with_toast(Toast::incomplete_form());
            let template = ScheduleFormTemplate::build(
                &state,
                chrome,
                FormMode::Create,
                LIST_PATH.to_string(),
                form,
                errors,
                None,
            )
            .await;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response());
        }
    };

    match state.queries().schedules().create(dto.branch_id, &dto).await {
        Ok(_) => {
            toast::push(
                &session,
                Toast::success("Horario creado", "El horario se ha registrado correctamente."),
            )
            .await?;
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            tracing::error!(branch_id = %dto.branch_id, error = %e, "Failed to create schedule");
            let chrome = Chrome::load(&session, LIST_PATH)
                .await
                .with_toast(Toast::failed(e.to_string()));
            let template = ScheduleFormTemplate::build(
                &state,
                chrome,
                FormMode::Create,
                LIST_PATH.to_string(),
                form,
                FieldErrors::new(),
                Some(e.to_string()),
            )
            .await;
            Ok(render(&template).into_response())
        }
    }
}

/// Duration preview fragment, re-requested by htmx as either time changes.
#[instrument]
pub async fn duration(Query(form): Query<ScheduleForm>) -> DurationTemplate {
    DurationTemplate {
        duration: DurationView::from(&form),
    }
}

/// Edit schedule form handler.
#[instrument(skip(state, session))]
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ScheduleId>,
) -> Result<Response, AppError> {
    let schedule = match state.queries().schedules().detail(Some(id)).await {
        Detail::Found(schedule) => schedule,
        Detail::NotFound | Detail::Disabled => {
            let template = NotFoundTemplate {
                chrome: Chrome::load(&session, LIST_PATH).await,
                title: "Horario no encontrado",
                back_href: LIST_PATH,
            };
            return Ok((StatusCode::NOT_FOUND, render(&template)).into_response());
        }
        Detail::Failed(e) => return Err(AppError::Backend(e)),
    };

    let template = ScheduleFormTemplate::build(
        &state,
        Chrome::load(&session, LIST_PATH).await,
        FormMode::Edit,
        format!("{LIST_PATH}/{id}"),
        ScheduleForm::from_schedule(&schedule),
        FieldErrors::new(),
        None,
    )
    .await;

    Ok(render(&template).into_response())
}

/// Update schedule handler.
///
/// The branch select is disabled in edit mode; the update never moves a
/// schedule to another branch.
#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ScheduleId>,
    Form(mut form): Form<ScheduleForm>,
) -> Result<Response, AppError> {
    let action = format!("{LIST_PATH}/{id}");

    // Disabled selects are not submitted; show the stored branch again.
    if form.branch_id.is_empty()
        && let Some(schedule) = state.queries().schedules().detail(Some(id)).await.found()
    {
        form.branch_id = schedule.branch_id.map(|b| b.to_string()).unwrap_or_default();
    }

    let dto = match form.to_update() {
        Ok(dto) => dto,
        Err(errors) => {
            let chrome = Chrome::load(&session, LIST_PATH)
                .await
                .with_toast(Toast::incomplete_form());
            let template = ScheduleFormTemplate::build(
                &state,
                chrome,
                FormMode::Edit,
                action,
                form,
                errors,
                None,
            )
            .await;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response());
        }
    };

    match state.queries().schedules().update(id, &dto).await {
        Ok(_) => {
            toast::push(
                &session,
                Toast::success(
                    "Horario actualizado",
                    "Los datos se han actualizado correctamente.",
                ),
            )
            .await?;
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(e) => {
            tracing::error!(schedule_id = %id, error = %e, "Failed to update schedule");
            let chrome = Chrome::load(&session, LIST_PATH)
                .await
                .with_toast(Toast::failed(e.to_string()));
            let template = ScheduleFormTemplate::build(
                &state,
                chrome,
                FormMode::Edit,
                action,
                form,
                FieldErrors::new(),
                Some(e.to_string()),
            )
            .await;
            Ok(render(&template).into_response())
        }
    }
}

/// Delete schedule handler.
///
/// The list's modal posts `confirmado=true`; anything else is a no-op.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ScheduleId>,
    Form(confirm): Form<ConfirmForm>,
) -> Result<Redirect, AppError> {
    if !confirm.confirmado {
        tracing::debug!(schedule_id = %id, "Schedule delete not confirmed");
        return Ok(Redirect::to(LIST_PATH));
    }

    let notice = match state.queries().schedules().delete(id).await {
        Ok(()) => Toast::success("Horario eliminado", "El horario se ha eliminado correctamente."),
        Err(e) => {
            tracing::error!(schedule_id = %id, error = %e, "Failed to delete schedule");
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

    fn schedule(day: &str, opens: &str, closes: &str) -> Schedule {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "diaSemana": day,
            "horaApertura": opens,
            "horaCierre": closes,
            "sucursalId": 5,
        }))
        .unwrap()
    }

    #[test]
    fn test_row_uses_spanish_day_and_duration() {
        let row = ScheduleRow::new(&schedule("MONDAY", "09:00", "17:00"), Some("Av. Central 100"));
        assert_eq!(row.day, "Lunes");
        assert_eq!(row.range, "09:00 - 17:00");
        assert_eq!(row.duration, "8h");
        assert_eq!(row.branch, "Av. Central 100");
    }

    #[test]
    fn test_row_without_branch() {
        let row = ScheduleRow::new(&schedule("SUNDAY", "10:15", "12:00"), None);
        assert_eq!(row.duration, "1h 45m");
        assert_eq!(row.branch, "Sin sucursal");
    }

    #[test]
    fn test_duration_view_states() {
        let mut form = ScheduleForm::default();
        let view = DurationView::from(&form);
        assert!(view.label.is_none() && view.error.is_none());

        form.opens_at = "09:00".to_string();
        form.closes_at = "09:00".to_string();
        let view = DurationView::from(&form);
        assert!(view.error.unwrap().contains("hora de cierre debe ser posterior"));

        form.closes_at = "13:30".to_string();
        assert_eq!(DurationView::from(&form).label.as_deref(), Some("4h 30m"));
    }

    #[tokio::test]
    async fn test_duration_fragment_renders_label() {
        let form = ScheduleForm {
            opens_at: "08:00".to_string(),
            closes_at: "16:45".to_string(),
            ..ScheduleForm::default()
        };
        let html = duration(Query(form)).await.render().unwrap();
        assert!(html.contains("8h 45m"));
    }
}
