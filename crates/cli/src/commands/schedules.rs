//! Schedule commands.

use sucursales_admin::backend::BackendClient;
use sucursales_core::BranchId;
use sucursales_core::forms::ScheduleForm;

use super::CommandError;

/// Print opening hours, all or for one branch.
pub async fn list(backend: &BackendClient, branch_id: Option<BranchId>) -> Result<(), CommandError> {
    let api = backend.schedules();
    let schedules = match branch_id {
        Some(id) => api.get_by_branch(id).await?,
        None => api.get_all().await?,
    };

    if schedules.is_empty() {
        tracing::info!("No hay horarios registrados");
        return Ok(());
    }

    for schedule in &schedules {
        tracing::info!(
            "#{} {} {} ({})",
            schedule.id,
            schedule.weekday.label(),
            schedule.time_range(),
            schedule
                .duration_label()
                .unwrap_or_else(|e| e.to_string())
        );
    }
    Ok(())
}

/// Create an opening window after the same validation the console applies.
pub async fn create(
    backend: &BackendClient,
    branch_id: BranchId,
    weekday: &str,
    opens_at: &str,
    closes_at: &str,
) -> Result<(), CommandError> {
    let form = ScheduleForm {
        weekday: weekday.trim().to_uppercase(),
        opens_at: opens_at.to_owned(),
        closes_at: closes_at.to_owned(),
        branch_id: branch_id.to_string(),
    };

    let dto = form.to_create().map_err(|errors| {
        let message = errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        CommandError::Invalid(message)
    })?;

    let schedule = backend.schedules().create(branch_id, &dto).await?;
    tracing::info!(
        "Horario #{} creado: {} {}",
        schedule.id,
        schedule.weekday.label(),
        schedule.time_range()
    );
    Ok(())
}
