//! Staff commands.

use sucursales_admin::backend::BackendClient;
use sucursales_core::{BranchDirectory, BranchId, StaffId};

use super::CommandError;

/// Print every staff member with the branch they belong to.
pub async fn list(backend: &BackendClient) -> Result<(), CommandError> {
    let (staff_api, branch_api) = (backend.staff(), backend.branches());
    let (staff, branches) = tokio::try_join!(staff_api.get_all(), branch_api.get_all())?;
    let directory = BranchDirectory::new(&branches);

    if staff.is_empty() {
        tracing::info!("No hay personal registrado");
        return Ok(());
    }

    for member in &staff {
        tracing::info!(
            "#{} {} <{}> | {} | {}",
            member.id,
            member.full_name,
            member.email,
            member.corporate_number.as_deref().unwrap_or("-"),
            directory
                .staff_branch_address(member)
                .unwrap_or("Sin sucursal")
        );
    }
    Ok(())
}

/// Move a staff member to another branch.
pub async fn reassign(
    backend: &BackendClient,
    id: StaffId,
    branch_id: BranchId,
) -> Result<(), CommandError> {
    let member = backend.staff().reassign_branch(id, branch_id).await?;

    tracing::info!(
        "{} reasignado a la sucursal #{}",
        member.full_name,
        branch_id
    );
    if member.corporate_number.is_none() {
        tracing::info!("El número corporativo fue eliminado");
    }
    Ok(())
}
