//! Sucursales CLI - backend maintenance from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List branches with their status
//! suc-cli sucursales list
//!
//! # Deactivate / reactivate a branch
//! suc-cli sucursales desactivar 5
//! suc-cli sucursales activar 5
//!
//! # Move a staff member to another branch
//! suc-cli personal reasignar 8 --sucursal 2
//!
//! # Create an opening window
//! suc-cli horarios crear --sucursal 5 --dia MONDAY --apertura 09:00 --cierre 17:00
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_API_URL` - Base URL of the REST backend (required)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sucursales_core::{BranchId, StaffId};

mod commands;

#[derive(Parser)]
#[command(name = "suc-cli")]
#[command(author, version, about = "Sucursales CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage branches
    Sucursales {
        #[command(subcommand)]
        action: BranchAction,
    },
    /// Manage staff
    Personal {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Manage opening hours
    Horarios {
        #[command(subcommand)]
        action: ScheduleAction,
    },
}

#[derive(Subcommand)]
enum BranchAction {
    /// List all branches
    List,
    /// Mark a branch as active
    Activar {
        /// Branch ID
        id: i64,
    },
    /// Mark a branch as inactive
    Desactivar {
        /// Branch ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    /// List all staff
    List,
    /// Move a staff member to another branch (clears the corporate number)
    Reasignar {
        /// Staff ID
        id: i64,

        /// Target branch ID
        #[arg(short, long)]
        sucursal: i64,
    },
}

#[derive(Subcommand)]
enum ScheduleAction {
    /// List opening hours, optionally for one branch
    List {
        /// Only this branch
        #[arg(short, long)]
        sucursal: Option<i64>,
    },
    /// Create an opening window
    Crear {
        /// Branch ID
        #[arg(short, long)]
        sucursal: i64,

        /// Weekday (MONDAY .. SUNDAY)
        #[arg(short, long)]
        dia: String,

        /// Opening time (HH:mm)
        #[arg(short, long)]
        apertura: String,

        /// Closing time (HH:mm)
        #[arg(short, long)]
        cierre: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let backend = commands::backend()?;

    match cli.command {
        Commands::Sucursales { action } => match action {
            BranchAction::List => commands::branches::list(&backend).await?,
            BranchAction::Activar { id } => {
                commands::branches::set_active(&backend, BranchId::new(id), true).await?;
            }
            BranchAction::Desactivar { id } => {
                commands::branches::set_active(&backend, BranchId::new(id), false).await?;
            }
        },
        Commands::Personal { action } => match action {
            StaffAction::List => commands::staff::list(&backend).await?,
            StaffAction::Reasignar { id, sucursal } => {
                commands::staff::reassign(&backend, StaffId::new(id), BranchId::new(sucursal))
                    .await?;
            }
        },
        Commands::Horarios { action } => match action {
            ScheduleAction::List { sucursal } => {
                commands::schedules::list(&backend, sucursal.map(BranchId::new)).await?;
            }
            ScheduleAction::Crear {
                sucursal,
                dia,
                apertura,
                cierre,
            } => {
                commands::schedules::create(
                    &backend,
                    BranchId::new(sucursal),
                    &dia,
                    &apertura,
                    &cierre,
                )
                .await?;
            }
        },
    }
    Ok(())
}
