use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph};
use ratatui::Frame;

use super::{border_color, severity_color, severity_style};
use crate::application::services::monitor::{Metric, TankOverview};
use crate::domain::value_objects::thresholds::{ParameterThreshold, ThresholdSet};

/// Where `value` sits inside the critical band, as a gauge ratio.
fn band_ratio(value: f64, threshold: &ParameterThreshold) -> f64 {
    let span = threshold.max_critical - threshold.min_critical;
    if span > 0.0 && value.is_finite() {
        ((value - threshold.min_critical) / span).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn trend_label(trend: Option<f64>) -> String {
    match trend {
        Some(t) if t > 0.05 => format!("↑{t:.1}%"),
        Some(t) if t < -0.05 => format!("↓{:.1}%", t.abs()),
        Some(_) => "→0.0%".to_string(),
        None => String::new(),
    }
}

fn render_metric(frame: &mut Frame, metric: &Metric, thresholds: &ThresholdSet, area: Rect) {
    let ratio = thresholds
        .get(metric.parameter)
        .map_or(0.0, |t| band_ratio(metric.value, t));
    let label = format!(
        "{} {}",
        metric.parameter.format_value(metric.value),
        trend_label(metric.trend)
    );
    let gauge = Gauge::default()
        .block(Block::bordered().title(metric.parameter.label()))
        .gauge_style(Style::default().fg(severity_color(metric.severity)))
        .ratio(ratio)
        .label(label.trim_end().to_string());
    frame.render_widget(gauge, area);
}

/// Tank card plus one gauge per parameter. Gauges span the critical band so
/// the warning band sits in the middle.
pub fn render_dashboard(
    frame: &mut Frame,
    overview: Option<&TankOverview>,
    thresholds: &ThresholdSet,
    is_focused: bool,
    area: Rect,
) {
    let block = Block::bordered()
        .title("Metrics")
        .border_style(Style::default().fg(border_color(is_focused)));

    let Some(overview) = overview else {
        let empty = Paragraph::new("Select a tank")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [card_area, gauges_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let tank = &overview.tank;
    let last = overview.reading.as_ref().map_or_else(
        || "no readings".to_string(),
        |r| r.timestamp.format("%Y-%m-%d %H:%M").to_string(),
    );
    let card = vec![
        Line::from(vec![
            Span::raw(format!("{} ", overview.overall.emoji())),
            Span::raw(tank.name.clone()).bold(),
            Span::raw(format!(" · {} · {} L", tank.location_name, tank.capacity_liters)),
        ]),
        Line::from(vec![
            Span::raw(format!("risk {} · live ", tank.risk_level)),
            Span::styled(overview.overall.to_string(), severity_style(overview.overall)),
            Span::raw(format!(
                " · {} active alert(s) · last reading {last}",
                overview.active_alerts
            )),
        ]),
    ];
    frame.render_widget(Paragraph::new(card), card_area);

    if overview.metrics.is_empty() {
        return;
    }
    #[allow(clippy::cast_possible_truncation)]
    let count = overview.metrics.len() as u32;
    let columns = Layout::horizontal(
        overview
            .metrics
            .iter()
            .map(|_| Constraint::Ratio(1, count)),
    )
    .split(gauges_area);
    for (metric, column) in overview.metrics.iter().zip(columns.iter()) {
        let [gauge_area, _] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(*column);
        render_metric(frame, metric, thresholds, gauge_area);
    }
}
