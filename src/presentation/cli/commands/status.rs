use colored::Colorize;

use crate::application::services::monitor::{MonitorService, TankOverview};
use crate::domain::value_objects::thresholds::ThresholdSet;
use crate::presentation::cli::formatters::status_fmt::{
    format_metric, format_tank_header, print_section_header,
};

/// Prints the tank card and metric cards of one tank, or of every tank.
///
/// # Errors
///
/// Returns an error if the tank does not exist, a threshold is missing, or
/// JSON serialization fails.
pub fn run_status(
    monitor: &MonitorService<'_>,
    tank: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let overviews = match tank {
        Some(id) => vec![monitor.overview(id)?],
        None => monitor
            .tanks()?
            .iter()
            .map(|t| monitor.overview(&t.id))
            .collect::<Result<Vec<_>, _>>()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&overviews)?);
        return Ok(());
    }

    let thresholds = monitor.thresholds()?;
    println!("{}", "namjai — Water Quality Status".bold().cyan());
    println!("{}", "━".repeat(50));
    for overview in &overviews {
        print_overview(overview, &thresholds)?;
    }

    let counts = monitor.alert_counts()?;
    println!();
    let summary = format!(
        "🔔 {} active alert(s), {} critical",
        counts.active, counts.active_critical
    );
    if counts.active_critical > 0 {
        println!("{}", summary.red().bold());
    } else if counts.active > 0 {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.green());
    }
    Ok(())
}

fn print_overview(overview: &TankOverview, thresholds: &ThresholdSet) -> anyhow::Result<()> {
    println!();
    println!("{}", format_tank_header(overview));
    let Some(reading) = &overview.reading else {
        println!("  {}", "no readings yet".dimmed());
        return Ok(());
    };
    print_section_header(&format!(
        "  Latest reading {}",
        reading.timestamp.format("%Y-%m-%d %H:%M")
    ));
    for metric in &overview.metrics {
        let threshold = thresholds.get(metric.parameter)?;
        println!("{}", format_metric(metric, threshold));
    }
    Ok(())
}
