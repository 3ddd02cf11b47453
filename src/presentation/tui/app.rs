use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::{DateTime, Utc};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{ListState, Paragraph, TableState};
use ratatui::{Frame, Terminal};
use tracing::warn;

use crate::application::services::monitor::{AlertCounts, MonitorService, TankOverview, TankScan};
use crate::domain::entities::alert::{Alert, AlertFilter};
use crate::domain::entities::user::User;
use crate::domain::value_objects::thresholds::ThresholdSet;
use crate::presentation::tui::event::{next_filter, wrap_next, wrap_prev, ActivePanel};
use crate::presentation::tui::widgets::alert_panel::render_alert_panel;
use crate::presentation::tui::widgets::dashboard::render_dashboard;
use crate::presentation::tui::widgets::tank_list::render_tank_list;

struct App<'a> {
    monitor: &'a MonitorService<'a>,
    actor: Option<&'a User>,

    scans: Vec<TankScan>,
    overview: Option<TankOverview>,
    thresholds: ThresholdSet,
    alerts: Vec<Alert>,
    counts: AlertCounts,
    refreshed_at: Option<DateTime<Utc>>,

    alert_filter: AlertFilter,
    active_panel: ActivePanel,
    tank_state: TableState,
    alert_list_state: ListState,
    status_message: Option<String>,

    should_quit: bool,
    tick_rate: Duration,
}

impl<'a> App<'a> {
    #[must_use]
    fn new(monitor: &'a MonitorService<'a>, actor: Option<&'a User>, interval_secs: u64) -> Self {
        Self {
            monitor,
            actor,
            scans: Vec::new(),
            overview: None,
            thresholds: ThresholdSet::default(),
            alerts: Vec::new(),
            counts: AlertCounts::default(),
            refreshed_at: None,
            alert_filter: AlertFilter::default(),
            active_panel: ActivePanel::default(),
            tank_state: TableState::default(),
            alert_list_state: ListState::default(),
            status_message: None,
            should_quit: false,
            tick_rate: Duration::from_secs(interval_secs.max(1)),
        }
    }

    /// Rescans every tank and reloads the panels. Failures land in the
    /// status bar rather than tearing down the terminal.
    fn refresh_data(&mut self) {
        if let Err(e) = self.try_refresh() {
            warn!(error = %e, "dashboard refresh failed");
            self.status_message = Some(format!("Refresh failed: {e}"));
        }
        self.clamp_selections();
    }

    fn try_refresh(&mut self) -> anyhow::Result<()> {
        self.thresholds = self.monitor.thresholds()?;
        self.scans = self.monitor.scan_all()?;
        if self.tank_state.selected().is_none() && !self.scans.is_empty() {
            self.tank_state.select(Some(0));
        }
        self.reload_overview()?;
        self.reload_alerts()?;
        self.refreshed_at = Some(Utc::now());
        Ok(())
    }

    fn reload_overview(&mut self) -> anyhow::Result<()> {
        self.overview = match self
            .tank_state
            .selected()
            .and_then(|i| self.scans.get(i))
        {
            Some(scan) => Some(self.monitor.overview(&scan.tank.id)?),
            None => None,
        };
        Ok(())
    }

    fn reload_alerts(&mut self) -> anyhow::Result<()> {
        self.alerts = self.monitor.list_alerts(self.alert_filter)?;
        self.counts = self.monitor.alert_counts()?;
        Ok(())
    }

    fn clamp_selections(&mut self) {
        let tank = clamp(self.tank_state.selected(), self.scans.len());
        self.tank_state.select(tank);
        let alert = clamp(self.alert_list_state.selected(), self.alerts.len());
        self.alert_list_state.select(alert);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.active_panel = self.active_panel.next(),
            KeyCode::BackTab => self.active_panel = self.active_panel.prev(),
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(wrap_next),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(wrap_prev),
            KeyCode::Char('f') => {
                self.alert_filter = next_filter(self.alert_filter);
                self.alert_list_state.select(None);
                if let Err(e) = self.reload_alerts() {
                    self.status_message = Some(format!("Refresh failed: {e}"));
                }
            }
            KeyCode::Char('a') => self.acknowledge_selected(),
            KeyCode::Char('r') => self.refresh_data(),
            _ => {}
        }
    }

    fn move_selection(&mut self, step: fn(Option<usize>, usize) -> Option<usize>) {
        match self.active_panel {
            ActivePanel::Metrics => {}
            ActivePanel::Tanks => {
                let next = step(self.tank_state.selected(), self.scans.len());
                if next != self.tank_state.selected() {
                    self.tank_state.select(next);
                    if let Err(e) = self.reload_overview() {
                        self.status_message = Some(format!("Refresh failed: {e}"));
                    }
                }
            }
            ActivePanel::Alerts => {
                let next = step(self.alert_list_state.selected(), self.alerts.len());
                self.alert_list_state.select(next);
            }
        }
    }

    fn acknowledge_selected(&mut self) {
        let Some(id) = self
            .alert_list_state
            .selected()
            .and_then(|i| self.alerts.get(i))
            .map(|a| a.id.clone())
        else {
            self.status_message = Some("Select an alert in the Alerts panel first".to_string());
            return;
        };
        let Some(actor) = self.actor else {
            self.status_message =
                Some("No signed-in user; start with --user to acknowledge".to_string());
            return;
        };

        self.status_message = Some(match self.monitor.acknowledge(&id, actor, Utc::now()) {
            Ok(_) => format!("Alert #{id} acknowledged by {}", actor.full_name),
            Err(e) => format!("Cannot acknowledge #{id}: {e}"),
        });
        if let Err(e) = self.reload_alerts().and_then(|()| self.reload_overview()) {
            self.status_message = Some(format!("Refresh failed: {e}"));
        }
        self.clamp_selections();
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header_area);

        let [tank_area, metrics_area, alert_area] = Layout::vertical([
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Fill(1),
        ])
        .areas(body_area);

        render_tank_list(
            frame,
            &self.scans,
            &mut self.tank_state,
            self.active_panel == ActivePanel::Tanks,
            tank_area,
        );
        render_dashboard(
            frame,
            self.overview.as_ref(),
            &self.thresholds,
            self.active_panel == ActivePanel::Metrics,
            metrics_area,
        );
        render_alert_panel(
            frame,
            &self.alerts,
            &mut self.alert_list_state,
            self.alert_filter,
            self.active_panel == ActivePanel::Alerts,
            alert_area,
        );

        self.render_status_bar(frame, status_area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let timestamp = self.refreshed_at.map_or_else(
            || "--:--:--".to_string(),
            |t| t.format("%H:%M:%S").to_string(),
        );
        let who = self
            .actor
            .map_or_else(|| "not signed in".to_string(), |u| {
                format!("{} ({})", u.full_name, u.role.label())
            });
        let alert_style = if self.counts.active_critical > 0 {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if self.counts.active > 0 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Green)
        };

        let header = Line::from(vec![
            Span::styled(
                " NAMJAI ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("│ "),
            Span::styled(
                format!("[{}]", self.active_panel),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" │ "),
            Span::styled(
                format!(
                    "{} active / {} critical",
                    self.counts.active, self.counts.active_critical
                ),
                alert_style,
            ),
            Span::raw(" │ "),
            Span::raw(who),
            Span::raw(" │ "),
            Span::styled(timestamp, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled(" q", key_style),
            Span::raw(":quit "),
            Span::styled("Tab", key_style),
            Span::raw(":panel "),
            Span::styled("j/k", key_style),
            Span::raw(":nav "),
            Span::styled("f", key_style),
            Span::raw(":filter "),
            Span::styled("a", key_style),
            Span::raw(":ack "),
            Span::styled("r", key_style),
            Span::raw(":refresh"),
        ];
        if let Some(message) = &self.status_message {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(message.clone(), Style::default().fg(Color::White)));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray)),
            area,
        );
    }
}

fn clamp(selected: Option<usize>, count: usize) -> Option<usize> {
    selected.and_then(|i| count.checked_sub(1).map(|last| i.min(last)))
}

/// Restore the terminal to its normal state.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        eprintln!("Failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        eprintln!("Failed to leave alternate screen: {e}");
    }
}

/// Launch the live dashboard, rescanning every `interval_secs`.
///
/// # Errors
///
/// Returns an error if terminal setup, rendering, or event handling fails.
pub fn run_tui(
    monitor: &MonitorService<'_>,
    actor: Option<&User>,
    interval_secs: u64,
) -> anyhow::Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    // Restore the terminal even if drawing panics.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(monitor, actor, interval_secs);
    app.refresh_data();

    let result = run_app_loop(&mut terminal, &mut app);

    restore_terminal();
    let _ = terminal.show_cursor();
    let _ = std::panic::take_hook();

    result
}

fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<'_>,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        let timeout = app.tick_rate.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            if let CrosstermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            app.refresh_data();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
