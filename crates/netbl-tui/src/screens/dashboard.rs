//! Dashboard screen: live rate meters, 24h traffic sparkline, top
//! devices, and active alerts. The only screen that drives the poll
//! loop; data arrives via [`Action::SummaryUpdated`].

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Sparkline, Table};

use netbl_core::format::{format_bytes, format_date, format_rate};
use netbl_core::{Alert, AlertSeverity, NetworkSummary, ViewState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::meter;

pub struct DashboardScreen {
    focused: bool,
    summary: ViewState<NetworkSummary>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            summary: ViewState::Loading,
        }
    }

    fn render_ready(&self, frame: &mut Frame, area: Rect, summary: &Arc<NetworkSummary>) {
        let layout = Layout::vertical([
            Constraint::Length(4), // rate meters
            Constraint::Length(3), // totals
            Constraint::Length(6), // 24h sparkline
            Constraint::Min(4),    // top devices + alerts
        ])
        .split(area);

        self.render_meters(frame, layout[0], summary);
        self.render_totals(frame, layout[1], summary);
        self.render_sparkline(frame, layout[2], summary);

        let bottom = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[3]);
        self.render_top_devices(frame, bottom[0], summary);
        self.render_alerts(frame, bottom[1], summary);
    }

    fn render_meters(&self, frame: &mut Frame, area: Rect, summary: &Arc<NetworkSummary>) {
        let current = &summary.current;
        let halves =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);

        meter::render_meter(
            frame,
            halves[0],
            " Download ",
            format_rate(current.download),
            current.download_pct(),
        );
        meter::render_meter(
            frame,
            halves[1],
            " Upload ",
            format_rate(current.upload),
            current.upload_pct(),
        );
    }

    fn render_totals(&self, frame: &mut Frame, area: Rect, summary: &Arc<NetworkSummary>) {
        let current = &summary.current;
        let halves =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);

        let today = Paragraph::new(Line::from(vec![
            Span::styled(" Today: ", theme::key_hint()),
            Span::raw(format_bytes(current.daily_total)),
        ]))
        .block(Block::default().borders(Borders::NONE));
        frame.render_widget(today, halves[0]);

        meter::render_meter(
            frame,
            halves[1],
            " Monthly ",
            format!(
                "{} / {}",
                format_bytes(current.monthly_total),
                format_bytes(current.monthly_limit)
            ),
            current.monthly_pct(),
        );
    }

    fn render_sparkline(&self, frame: &mut Frame, area: Rect, summary: &Arc<NetworkSummary>) {
        let totals: Vec<u64> = summary.hourly.iter().map(|p| p.total).collect();
        let peak = totals.iter().copied().max().unwrap_or(0);

        let block = Block::default()
            .title(format!(" Traffic (24h, peak {}) ", format_bytes(peak)))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());

        let sparkline = Sparkline::default()
            .block(block)
            .data(&totals)
            .style(Style::default().fg(theme::DOWNLOAD_CYAN));
        frame.render_widget(sparkline, area);
    }

    fn render_top_devices(&self, frame: &mut Frame, area: Rect, summary: &Arc<NetworkSummary>) {
        let rows: Vec<Row> = summary
            .top_devices
            .iter()
            .map(|d| {
                Row::new(vec![
                    Cell::from(d.name.clone()),
                    Cell::from(d.device_type.to_string()),
                    Cell::from(format_bytes(d.usage)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(14),
                Constraint::Length(12),
            ],
        )
        .header(Row::new(vec!["Device", "Type", "7-Day Usage"]).style(theme::table_header()))
        .block(
            Block::default()
                .title(" Top Devices ")
                .title_style(theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(self.border_style()),
        );
        frame.render_widget(table, area);
    }

    fn render_alerts(&self, frame: &mut Frame, area: Rect, summary: &Arc<NetworkSummary>) {
        let block = Block::default()
            .title(format!(" Alerts ({}) ", summary.alerts.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());

        if summary.alerts.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No active alerts",
                    theme::key_hint(),
                )))
                .block(block),
                area,
            );
            return;
        }

        let lines: Vec<Line> = summary.alerts.iter().map(alert_line).collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn border_style(&self) -> Style {
        if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        }
    }
}

fn alert_line(alert: &Alert) -> Line<'_> {
    let severity_color = match alert.severity {
        AlertSeverity::Critical => theme::ERROR_RED,
        AlertSeverity::Warning => theme::WARN_YELLOW,
        AlertSeverity::Info | AlertSeverity::Other => theme::ACCENT_BLUE,
    };

    Line::from(vec![
        Span::styled(
            format!("[{}] ", alert.severity),
            Style::default().fg(severity_color),
        ),
        Span::styled(
            format!("{} ", format_date(Some(&alert.timestamp))),
            theme::key_hint(),
        ),
        Span::raw(alert.message.clone()),
    ])
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('r') => Ok(Some(Action::Refresh)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::SummaryUpdated(state) = action {
            self.summary = state.clone();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match &self.summary {
            ViewState::Loading => {
                frame.render_widget(
                    Paragraph::new("Loading network data…").style(theme::loading_text()),
                    area,
                );
            }
            ViewState::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(message.clone()).style(theme::error_text()),
                    area,
                );
            }
            ViewState::Ready(summary) => self.render_ready(frame, area, summary),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
