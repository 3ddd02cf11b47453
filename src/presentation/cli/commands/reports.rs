use chrono::Utc;
use colored::Colorize;

use crate::application::services::reports::{NewReport, ReportService};
use crate::domain::entities::report::Report;
use crate::domain::entities::user::User;
use crate::presentation::cli::app::ReportsCommand;
use crate::presentation::cli::formatters::status_fmt::print_section_header;
use crate::presentation::cli::formatters::table_fmt::format_report_table;

/// Dispatches a `reports` subcommand.
///
/// # Errors
///
/// Returns an error if the actor may not perform the action, the input is
/// invalid, the transition is not allowed, or the store fails.
pub fn run_reports(
    service: &ReportService<'_>,
    actor: &User,
    action: ReportsCommand,
) -> anyhow::Result<()> {
    let now = Utc::now();
    match action {
        ReportsCommand::List { status } => {
            let reports = service.list(status)?;
            let title = status.map_or_else(
                || "📝 Reports".to_string(),
                |s| format!("📝 Reports ({s})"),
            );
            print_section_header(&title);
            println!("{}", format_report_table(&reports));
        }
        ReportsCommand::Submit {
            tank,
            kind,
            description,
            photo,
        } => {
            let report = service.submit(
                actor,
                NewReport {
                    tank_id: tank,
                    report_type: kind,
                    description,
                    photo_url: photo,
                },
                now,
            )?;
            print_changed("submitted", &report);
        }
        ReportsCommand::Review { id } => {
            print_changed("under review", &service.start_review(&id, actor, now)?);
        }
        ReportsCommand::Resolve { id, notes } => {
            print_changed("resolved", &service.resolve(&id, actor, &notes, now)?);
        }
        ReportsCommand::Dismiss { id, notes } => {
            print_changed("dismissed", &service.dismiss(&id, actor, notes.as_deref(), now)?);
        }
    }
    Ok(())
}

fn print_changed(what: &str, report: &Report) {
    println!(
        "{} Report #{} for {} {}",
        "✔".green().bold(),
        report.id,
        report.tank_name,
        what
    );
}
