use chrono::Utc;
use colored::Colorize;

use crate::application::services::maintenance::{MaintenanceService, NewMaintenance};
use crate::domain::entities::maintenance::{MaintenanceLog, MaintenanceStatus};
use crate::domain::entities::user::User;
use crate::presentation::cli::app::MaintenanceCommand;
use crate::presentation::cli::formatters::status_fmt::print_section_header;
use crate::presentation::cli::formatters::table_fmt::{
    format_maintenance_table, format_sensor_table,
};

/// Dispatches a `maintenance` subcommand.
///
/// # Errors
///
/// Returns an error if the actor may not perform the action, the input is
/// invalid, the transition is not allowed, or the store fails.
pub fn run_maintenance(
    service: &MaintenanceService<'_>,
    actor: &User,
    action: MaintenanceCommand,
) -> anyhow::Result<()> {
    let now = Utc::now();
    match action {
        MaintenanceCommand::List { status } => {
            let logs = service.list(status)?;
            print_section_header("🔧 Maintenance");
            println!("{}", format_maintenance_table(&logs));
            let open_cost: f64 = logs
                .iter()
                .filter(|l| !l.status.is_terminal())
                .map(|l| l.cost)
                .sum();
            println!("\nOpen work: {open_cost:.2}");
        }
        MaintenanceCommand::Sensors => {
            let sensors = service.sensors()?;
            print_section_header("📡 Sensors");
            println!("{}", format_sensor_table(&sensors, now));
            let attention = sensors.iter().filter(|s| s.needs_attention()).count();
            if attention > 0 {
                println!(
                    "\n{}",
                    format!("{attention} sensor(s) need attention").yellow().bold()
                );
            }
        }
        MaintenanceCommand::Schedule {
            tank,
            kind,
            description,
            date,
            cost,
            notes,
        } => {
            let log = service.schedule(
                actor,
                NewMaintenance {
                    tank_id: tank,
                    maintenance_type: kind,
                    description,
                    scheduled_date: date,
                    cost,
                    notes,
                },
            )?;
            print_changed(&log);
        }
        MaintenanceCommand::Start { id } => {
            print_changed(&service.transition(&id, actor, MaintenanceStatus::InProgress, now)?);
        }
        MaintenanceCommand::Complete { id } => {
            print_changed(&service.transition(&id, actor, MaintenanceStatus::Completed, now)?);
        }
        MaintenanceCommand::Cancel { id } => {
            print_changed(&service.transition(&id, actor, MaintenanceStatus::Cancelled, now)?);
        }
    }
    Ok(())
}

fn print_changed(log: &MaintenanceLog) {
    println!(
        "{} {} #{} for {} is {} ({})",
        "✔".green().bold(),
        log.maintenance_type,
        log.id,
        log.tank_name,
        log.status,
        log.scheduled_date.format("%Y-%m-%d")
    );
}
