use colored::Colorize;

use crate::domain::entities::alert::Alert;
use crate::domain::value_objects::severity::Severity;

/// Strips ANSI/OSC escape sequences from a string to prevent terminal injection.
#[must_use]
pub fn sanitize_terminal(input: &str) -> String {
    input.chars().filter(|c| *c != '\x1b').collect()
}

fn severity_badge(severity: Severity) -> String {
    let label = format!(" {} ", severity.to_string().to_uppercase());
    match severity {
        Severity::Critical => format!("{}", label.on_red().white().bold()),
        Severity::Warning => format!("{}", label.on_yellow().black().bold()),
        Severity::Normal => format!("{}", label.on_green().black()),
    }
}

fn acknowledgement_line(alert: &Alert) -> String {
    match &alert.acknowledgement {
        Some(ack) => format!(
            "✔ acknowledged by {} at {}",
            sanitize_terminal(&ack.by),
            ack.at.format("%Y-%m-%d %H:%M")
        )
        .green()
        .to_string(),
        None => "● awaiting acknowledgement".yellow().to_string(),
    }
}

/// Renders one alert as a block of lines.
#[must_use]
pub fn format_alert(alert: &Alert) -> String {
    let mut lines = vec![format!(
        "{} {} {} {}",
        severity_badge(alert.severity),
        alert.severity.emoji(),
        alert.message.bold(),
        format!("#{}", alert.id).dimmed()
    )];
    lines.push(format!(
        "  {} — {} · {}",
        sanitize_terminal(&alert.tank_name),
        sanitize_terminal(&alert.location_name),
        alert.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
    ));
    for triggered in &alert.parameters_triggered {
        lines.push(format!(
            "    {:<12} {:>10}  (threshold {}, {})",
            triggered.parameter.label(),
            triggered.parameter.format_value(triggered.value),
            triggered.threshold,
            triggered.severity
        ));
    }
    lines.push(format!("  {}", acknowledgement_line(alert)));
    lines.join("\n")
}

pub fn format_alerts(alerts: &[Alert]) {
    for alert in alerts {
        println!();
        println!("{}", format_alert(alert));
    }
    println!();
}

pub fn print_no_alerts() {
    println!();
    println!(
        "{}",
        "✅ All tanks within thresholds — no alerts".green().bold()
    );
    println!();
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use colored::control;

    use crate::domain::entities::alert::{Acknowledgement, AlertType, TriggeredParameter};
    use crate::domain::value_objects::parameter::Parameter;

    fn disable_colors() {
        control::set_override(false);
    }

    fn make_alert(severity: Severity) -> Alert {
        Alert {
            id: "7".to_string(),
            tank_id: "2".to_string(),
            tank_name: "Tank 002B".to_string(),
            location_name: "Kibera South".to_string(),
            alert_type: AlertType::Single(Parameter::Ph),
            severity,
            message: "pH above critical threshold".to_string(),
            parameters_triggered: vec![TriggeredParameter {
                parameter: Parameter::Ph,
                value: 9.2,
                threshold: "9.0 max".to_string(),
                severity,
            }],
            acknowledgement: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).single().expect("date"),
        }
    }

    #[test]
    fn severity_badge_contains_level_name() {
        disable_colors();
        assert!(severity_badge(Severity::Critical).contains("CRITICAL"));
        assert!(severity_badge(Severity::Warning).contains("WARNING"));
        assert!(severity_badge(Severity::Normal).contains("NORMAL"));
    }

    #[test]
    fn format_alert_lists_triggered_parameters() {
        disable_colors();
        let text = format_alert(&make_alert(Severity::Critical));
        assert!(text.contains("pH above critical threshold"));
        assert!(text.contains("#7"));
        assert!(text.contains("Tank 002B — Kibera South"));
        assert!(text.contains("9.2"));
        assert!(text.contains("threshold 9.0 max, critical"));
        assert!(text.contains("awaiting acknowledgement"));
    }

    #[test]
    fn format_alert_shows_acknowledgement() {
        disable_colors();
        let mut alert = make_alert(Severity::Warning);
        alert.acknowledgement = Some(Acknowledgement {
            by: "Jane Kamau".to_string(),
            at: Utc.with_ymd_and_hms(2025, 1, 15, 11, 0, 0).single().expect("date"),
        });
        let text = format_alert(&alert);
        assert!(text.contains("acknowledged by Jane Kamau at 2025-01-15 11:00"));
    }

    #[test]
    fn format_alerts_does_not_panic() {
        disable_colors();
        format_alerts(&[make_alert(Severity::Critical), make_alert(Severity::Warning)]);
        format_alerts(&[]);
        print_no_alerts();
    }

    #[test]
    fn sanitize_terminal_strips_escape_sequences() {
        assert_eq!(sanitize_terminal("normal text"), "normal text");
        assert_eq!(sanitize_terminal("evil\x1b[31mred"), "evil[31mred");
    }
}
