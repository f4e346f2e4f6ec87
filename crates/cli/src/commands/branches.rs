//! Branch commands.

use sucursales_admin::backend::BackendClient;
use sucursales_core::BranchId;

use super::CommandError;

/// Print every branch with its status and contact count.
pub async fn list(backend: &BackendClient) -> Result<(), CommandError> {
    let branches = backend.branches().get_all().await?;

    if branches.is_empty() {
        tracing::info!("No hay sucursales registradas");
        return Ok(());
    }

    for branch in &branches {
        tracing::info!(
            "#{} {} | {} | {} | {} contactos",
            branch.id,
            branch.address,
            branch.phone,
            if branch.active { "Activa" } else { "Inactiva" },
            branch.contact_numbers.len()
        );
    }
    tracing::info!("{} sucursales", branches.len());
    Ok(())
}

/// Set a branch's active flag.
pub async fn set_active(
    backend: &BackendClient,
    id: BranchId,
    active: bool,
) -> Result<(), CommandError> {
    let api = backend.branches();
    let branch = if active {
        api.activate(id).await?
    } else {
        api.deactivate(id).await?
    };

    tracing::info!(
        "Sucursal #{} ({}) ahora está {}",
        branch.id,
        branch.address,
        if branch.active { "Activa" } else { "Inactiva" }
    );
    Ok(())
}
