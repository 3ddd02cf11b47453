pub mod alert_panel;
pub mod dashboard;
pub mod tank_list;

use ratatui::style::{Color, Modifier, Style};

use crate::domain::value_objects::severity::Severity;

pub(crate) const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Normal => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}

pub(crate) fn severity_style(severity: Severity) -> Style {
    let style = Style::default().fg(severity_color(severity));
    if matches!(severity, Severity::Critical) {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub(crate) const fn border_color(is_focused: bool) -> Color {
    if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    }
}

pub(crate) fn highlight_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    }
}
