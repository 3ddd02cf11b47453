use colored::{ColoredString, Colorize};

use crate::application::services::monitor::{Metric, TankOverview};
use crate::domain::entities::tank::RiskLevel;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::ParameterThreshold;

/// Position of `value` inside the critical band, drawn as a bar.
///
/// The band spans `min_critical..=max_critical`; values outside it pin the
/// bar to an end.
#[must_use]
pub fn band_gauge(value: f64, threshold: &ParameterThreshold, severity: Severity, width: usize) -> String {
    let span = threshold.max_critical - threshold.min_critical;
    let ratio = if span > 0.0 && value.is_finite() {
        ((value - threshold.min_critical) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_filled = colorize_severity(severity, &"█".repeat(filled));
    let bar_empty = "░".repeat(empty);
    format!("{bar_filled}{bar_empty}")
}

#[must_use]
pub fn colorize_severity(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Normal => text.green(),
        Severity::Warning => text.yellow(),
        Severity::Critical => text.red().bold(),
    }
}

#[must_use]
pub fn colorize_risk(risk: RiskLevel) -> ColoredString {
    let text = risk.to_string();
    match risk {
        RiskLevel::Low => text.green(),
        RiskLevel::Medium => text.yellow(),
        RiskLevel::High => text.red(),
        RiskLevel::Critical => text.red().bold(),
    }
}

/// `↑ 4.2%`, `↓ 1.0%`, `→ 0.0%`, or `–` when no trend is defined.
#[must_use]
pub fn trend_arrow(trend: Option<f64>) -> String {
    match trend {
        Some(t) if t > 0.05 => format!("↑ {t:.1}%"),
        Some(t) if t < -0.05 => format!("↓ {:.1}%", t.abs()),
        Some(_) => "→ 0.0%".to_string(),
        None => "–".to_string(),
    }
}

/// One metric card line: label, value, gauge, severity, trend.
#[must_use]
pub fn format_metric(metric: &Metric, threshold: &ParameterThreshold) -> String {
    format!(
        "  {:<12} {:>10}  {}  {}  {}",
        metric.parameter.label(),
        metric.parameter.format_value(metric.value),
        band_gauge(metric.value, threshold, metric.severity, 20),
        colorize_severity(metric.severity, &format!("{:<8}", metric.severity)),
        trend_arrow(metric.trend).dimmed()
    )
}

/// Tank card heading: name, location, status, manual risk and live severity
/// side by side.
#[must_use]
pub fn format_tank_header(overview: &TankOverview) -> String {
    let tank = &overview.tank;
    format!(
        "{} {} — {}\n  status: {}  risk: {}  live: {}  active alerts: {}",
        overview.overall.emoji(),
        tank.name.bold(),
        tank.location_name,
        tank.status,
        colorize_risk(tank.risk_level),
        colorize_severity(overview.overall, &overview.overall.to_string()),
        overview.active_alerts
    )
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}
