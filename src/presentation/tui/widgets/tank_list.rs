use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use super::{border_color, highlight_style, severity_style};
use crate::application::services::monitor::TankScan;
use crate::domain::entities::tank::{RiskLevel, TankStatus};

const fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::LightRed,
        RiskLevel::Critical => Color::Red,
    }
}

/// Render the tank registry with manual risk and live severity side by side.
pub fn render_tank_list(
    frame: &mut Frame,
    scans: &[TankScan],
    table_state: &mut TableState,
    is_focused: bool,
    area: Rect,
) {
    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let header_row = Row::new(
        ["Tank", "Location", "Status", "Risk", "Live"]
            .iter()
            .map(|h| Cell::from(Span::styled(*h, header_style))),
    )
    .height(1);

    let rows: Vec<Row> = scans
        .iter()
        .map(|scan| {
            let tank = &scan.tank;
            let status_style = if tank.status == TankStatus::Active {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Row::new(vec![
                Cell::from(tank.name.clone()),
                Cell::from(tank.location_name.clone()),
                Cell::from(tank.status.to_string()).style(status_style),
                Cell::from(tank.risk_level.to_string())
                    .style(Style::default().fg(risk_color(tank.risk_level))),
                Cell::from(format!("{} {}", scan.overall.emoji(), scan.overall))
                    .style(severity_style(scan.overall)),
            ])
            .height(1)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(12),
    ];

    let block = Block::default()
        .title("Tanks")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(is_focused)));

    let table = Table::new(rows, widths)
        .header(header_row)
        .block(block)
        .row_highlight_style(highlight_style(is_focused));

    frame.render_stateful_widget(table, area, table_state);
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::severity::Severity;
    use crate::infrastructure::seed;
    use ratatui::{backend::TestBackend, Terminal};

    fn scans() -> Vec<TankScan> {
        seed::tanks()
            .into_iter()
            .zip([Severity::Normal, Severity::Warning, Severity::Normal, Severity::Critical])
            .map(|(tank, overall)| TankScan {
                tank,
                reading: None,
                assessments: Vec::new(),
                overall,
                alert: None,
                new_alert: false,
            })
            .collect()
    }

    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_every_tank() {
        let backend = TestBackend::new(90, 10);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let scans = scans();
        let mut state = TableState::default().with_selected(Some(1));
        terminal
            .draw(|frame| render_tank_list(frame, &scans, &mut state, true, frame.area()))
            .expect("draw");
        let text = rendered(&terminal);
        assert!(text.contains("Tank 001A"));
        assert!(text.contains("Tank 004D"));
        assert!(text.contains("maintenance"));
        assert!(text.contains("critical"));
    }

    #[test]
    fn renders_empty_registry() {
        let backend = TestBackend::new(60, 5);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let mut state = TableState::default();
        terminal
            .draw(|frame| render_tank_list(frame, &[], &mut state, false, frame.area()))
            .expect("draw");
        assert!(rendered(&terminal).contains("Tanks"));
    }
}
