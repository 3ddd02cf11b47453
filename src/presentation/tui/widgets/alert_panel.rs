use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use super::{border_color, highlight_style, severity_style};
use crate::domain::entities::alert::{Alert, AlertFilter};
use crate::presentation::cli::formatters::alert_fmt::sanitize_terminal;

fn alert_item(alert: &Alert) -> ListItem<'static> {
    let style = severity_style(alert.severity);
    let headline = Line::from(vec![
        Span::styled(
            format!(
                "{} [{}] {}",
                alert.severity.emoji(),
                alert.severity,
                sanitize_terminal(&alert.message)
            ),
            style,
        ),
        Span::styled(format!("  #{}", alert.id), Style::default().fg(Color::DarkGray)),
    ]);

    let state = alert
        .acknowledged_by()
        .map_or_else(|| "active".to_string(), |by| format!("ack by {by}"));
    let detail = Line::from(Span::styled(
        format!(
            "    {} · {} · {}",
            alert.tank_name,
            alert.created_at.format("%m-%d %H:%M"),
            state
        ),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    ));

    ListItem::new(vec![headline, detail])
}

/// Alert history, filtered; the title shows which filter is applied.
pub fn render_alert_panel(
    frame: &mut Frame,
    alerts: &[Alert],
    list_state: &mut ListState,
    filter: AlertFilter,
    is_focused: bool,
    area: Rect,
) {
    let block = Block::default()
        .title(format!("Alerts ({filter})"))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color(is_focused)));

    let items: Vec<ListItem<'_>> = if alerts.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No alerts",
            Style::default().fg(Color::Green),
        )))]
    } else {
        alerts.iter().map(alert_item).collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(is_focused));

    frame.render_stateful_widget(list, area, list_state);
}
