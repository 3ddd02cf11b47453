use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::domain::entities::maintenance::{MaintenanceLog, MaintenanceStatus};
use crate::domain::entities::report::{Report, ReportStatus};
use crate::domain::entities::sensor::SensorStatus;
use crate::domain::entities::user::{User, UserStatus};
use crate::domain::value_objects::thresholds::ThresholdSet;
use crate::presentation::cli::formatters::alert_fmt::sanitize_terminal;

fn truncate(text: &str, width: usize) -> String {
    sanitize_terminal(text).chars().take(width).collect()
}

fn with_header(header: String, rows: Vec<String>) -> String {
    let separator = "─".repeat(header.chars().count());
    let mut lines = vec![header, separator];
    lines.extend(rows);
    lines.join("\n")
}

/// Reports as an aligned table; resolution notes follow on an indented line.
#[must_use]
pub fn format_report_table(reports: &[Report]) -> String {
    let header = format!(
        "{:<4} {:<10} {:<15} {:<13} {:<16} {:<17} {:<30}",
        "ID", "TANK", "TYPE", "STATUS", "SUBMITTED BY", "CREATED", "DESCRIPTION"
    );
    let mut rows = Vec::new();
    for r in reports {
        let row = format!(
            "{:<4} {:<10} {:<15} {:<13} {:<16} {:<17} {:<30}",
            r.id,
            truncate(&r.tank_name, 10),
            r.report_type,
            r.status,
            truncate(&r.submitted_by_name, 16),
            r.created_at.format("%Y-%m-%d %H:%M"),
            truncate(&r.description, 30)
        );
        rows.push(match r.status {
            ReportStatus::Pending => row.yellow().to_string(),
            ReportStatus::UnderReview => row.cyan().to_string(),
            ReportStatus::Resolved | ReportStatus::Dismissed => row,
        });
        if let Some(notes) = &r.resolution_notes {
            let reviewer = r.reviewed_by.as_deref().unwrap_or("?");
            rows.push(
                format!("     ↳ {}: {}", sanitize_terminal(reviewer), sanitize_terminal(notes))
                    .dimmed()
                    .to_string(),
            );
        }
    }
    with_header(header, rows)
}

#[must_use]
pub fn format_maintenance_table(logs: &[MaintenanceLog]) -> String {
    let header = format!(
        "{:<4} {:<10} {:<19} {:<12} {:<11} {:>9} {:<16} {:<30}",
        "ID", "TANK", "TYPE", "STATUS", "SCHEDULED", "COST", "BY", "DESCRIPTION"
    );
    let rows = logs
        .iter()
        .map(|log| {
            let row = format!(
                "{:<4} {:<10} {:<19} {:<12} {:<11} {:>9.2} {:<16} {:<30}",
                log.id,
                truncate(&log.tank_name, 10),
                log.maintenance_type,
                log.status,
                log.scheduled_date.format("%Y-%m-%d"),
                log.cost,
                truncate(&log.performed_by_name, 16),
                truncate(&log.description, 30)
            );
            match log.status {
                MaintenanceStatus::Scheduled => row.cyan().to_string(),
                MaintenanceStatus::InProgress => row.yellow().to_string(),
                MaintenanceStatus::Completed => row.green().to_string(),
                MaintenanceStatus::Cancelled => row.dimmed().to_string(),
            }
        })
        .collect();
    with_header(header, rows)
}

/// Sensor health table; sensors needing attention or overdue for
/// calibration are highlighted.
#[must_use]
pub fn format_sensor_table(sensors: &[SensorStatus], now: DateTime<Utc>) -> String {
    let header = format!(
        "{:<4} {:<10} {:<12} {:<18} {:>8} {:>7} {:<16}",
        "ID", "TANK", "SENSOR", "STATUS", "BATTERY", "SIGNAL", "NEXT CALIBRATION"
    );
    let rows = sensors
        .iter()
        .map(|s| {
            let overdue = s.is_calibration_overdue(now);
            let next = s.next_calibration.map_or_else(
                || "–".to_string(),
                |d| {
                    let date = d.format("%Y-%m-%d").to_string();
                    if overdue {
                        format!("{date} (overdue)")
                    } else {
                        date
                    }
                },
            );
            let row = format!(
                "{:<4} {:<10} {:<12} {:<18} {:>7}% {:>6}% {:<16}",
                s.id,
                truncate(&s.tank_name, 10),
                s.sensor_type.label(),
                s.status,
                s.battery_level,
                s.signal_strength,
                next
            );
            if s.needs_attention() || overdue {
                row.red().to_string()
            } else {
                row
            }
        })
        .collect();
    with_header(header, rows)
}

#[must_use]
pub fn format_user_table(users: &[User]) -> String {
    let header = format!(
        "{:<4} {:<30} {:<20} {:<14} {:<9}",
        "ID", "EMAIL", "NAME", "ROLE", "STATUS"
    );
    let rows = users
        .iter()
        .map(|u| {
            let row = format!(
                "{:<4} {:<30} {:<20} {:<14} {:<9}",
                u.id,
                truncate(&u.email, 30),
                truncate(&u.full_name, 20),
                u.role.label(),
                u.status
            );
            if u.status == UserStatus::Active {
                row
            } else {
                row.dimmed().to_string()
            }
        })
        .collect();
    with_header(header, rows)
}

#[must_use]
pub fn format_threshold_table(thresholds: &ThresholdSet) -> String {
    let header = format!(
        "{:<12} {:>12} {:>12} {:>12} {:>12}",
        "PARAMETER", "MIN CRIT", "MIN WARN", "MAX WARN", "MAX CRIT"
    );
    let rows = thresholds
        .iter()
        .map(|t| {
            let p = t.parameter;
            let cell = |value: f64| format!("{:>12}", p.format_value(value));
            format!(
                "{:<12} {} {} {} {}",
                p.label(),
                cell(t.min_critical).red(),
                cell(t.min_warning).yellow(),
                cell(t.max_warning).yellow(),
                cell(t.max_critical).red()
            )
        })
        .collect();
    with_header(header, rows)
}
