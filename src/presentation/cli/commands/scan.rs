use colored::Colorize;
use tracing::info;

use crate::application::config::NotificationSettings;
use crate::application::services::monitor::{MonitorService, TankScan};
use crate::presentation::cli::formatters::alert_fmt;
use crate::presentation::cli::formatters::status_fmt::{colorize_severity, print_section_header};

/// Runs a one-shot scan: evaluate every tank's latest reading, store new
/// alerts, display the outcome.
///
/// # Errors
///
/// Returns an error if a threshold is missing, the store fails, or JSON
/// serialization fails.
pub fn run_scan(
    monitor: &MonitorService<'_>,
    notifications: &NotificationSettings,
    json: bool,
) -> anyhow::Result<()> {
    let scans = monitor.scan_all()?;

    let channels_enabled = notifications.email_alerts || notifications.push_alerts;
    let notifiable = scans
        .iter()
        .filter(|s| channels_enabled && s.new_alert)
        .filter_map(|s| s.alert.as_ref())
        .filter(|a| notifications.admits(a.severity))
        .count();
    if notifiable > 0 {
        info!(
            count = notifiable,
            email = notifications.email_alerts,
            push = notifications.push_alerts,
            "alerts match notification settings"
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&scans)?);
    } else {
        print_scans_human(&scans, notifiable);
    }
    Ok(())
}

fn print_scans_human(scans: &[TankScan], notifiable: usize) {
    print_section_header("🔍 Tank scan");
    for scan in scans {
        let overall = colorize_severity(scan.overall, &scan.overall.to_string());
        let taken = scan.reading.as_ref().map_or_else(
            || "no readings".to_string(),
            |r| r.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        );
        println!(
            "{} {:<10} {:<28} {} {}",
            scan.overall.emoji(),
            scan.tank.name,
            scan.tank.location_name,
            overall,
            taken.dimmed()
        );
    }

    let alerts: Vec<_> = scans.iter().filter_map(|s| s.alert.clone()).collect();
    if alerts.is_empty() {
        alert_fmt::print_no_alerts();
        return;
    }
    let new = scans.iter().filter(|s| s.new_alert).count();
    println!();
    println!(
        "{} alert(s) detected, {} new",
        alerts.len(),
        new.to_string().bold()
    );
    alert_fmt::format_alerts(&alerts);
    if notifiable > 0 {
        println!("📣 {notifiable} new alert(s) match your notification settings");
    }
}
