//! Device detail screen: identity, 30-day usage history, and
//! device-scoped alerts. Esc returns to the device list.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Sparkline, Table};

use netbl_core::format::{format_bytes, format_date};
use netbl_core::{DeviceDetail, ViewState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct DeviceDetailScreen {
    focused: bool,
    detail: ViewState<DeviceDetail>,
}

impl DeviceDetailScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            detail: ViewState::Loading,
        }
    }

    fn render_ready(&self, frame: &mut Frame, area: Rect, detail: &Arc<DeviceDetail>) {
        let layout = Layout::vertical([
            Constraint::Length(6), // identity
            Constraint::Length(5), // usage sparkline
            Constraint::Min(4),    // usage table + alerts
        ])
        .split(area);

        self.render_identity(frame, layout[0], detail);
        self.render_usage_sparkline(frame, layout[1], detail);

        let bottom = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[2]);
        self.render_usage_table(frame, bottom[0], detail);
        self.render_alerts(frame, bottom[1], detail);
    }

    fn render_identity(&self, frame: &mut Frame, area: Rect, detail: &Arc<DeviceDetail>) {
        let d = &detail.device;
        let lines = vec![
            Line::from(vec![
                Span::styled("MAC: ", theme::key_hint()),
                Span::raw(d.mac.clone()),
                Span::styled("   IP: ", theme::key_hint()),
                Span::raw(d.ip.clone()),
                Span::styled("   Type: ", theme::key_hint()),
                Span::raw(d.device_type.to_string()),
            ]),
            Line::from(vec![
                Span::styled("First seen: ", theme::key_hint()),
                Span::raw(format_date(d.first_seen.as_deref())),
                Span::styled("   Last seen: ", theme::key_hint()),
                Span::raw(format_date(d.last_seen.as_deref())),
            ]),
            Line::from(vec![
                Span::styled("This month: ", theme::key_hint()),
                Span::raw(format!(
                    "{} down / {} up",
                    format_bytes(d.month_download),
                    format_bytes(d.month_upload)
                )),
            ]),
        ];

        let block = Block::default()
            .title(format!(" {} ", d.name))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_usage_sparkline(&self, frame: &mut Frame, area: Rect, detail: &Arc<DeviceDetail>) {
        let totals: Vec<u64> = detail.usage.iter().map(|p| p.total).collect();

        let block = Block::default()
            .title(" Usage (30 days) ")
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

    fn render_usage_table(&self, frame: &mut Frame, area: Rect, detail: &Arc<DeviceDetail>) {
        let rows: Vec<Row> = detail
            .usage
            .iter()
            .map(|p| {
                Row::new(vec![
                    Cell::from(p.date.clone()),
                    Cell::from(format_bytes(p.download)),
                    Cell::from(format_bytes(p.upload)),
                    Cell::from(format_bytes(p.total)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(12),
            ],
        )
        .header(Row::new(vec!["Date", "Download", "Upload", "Total"]).style(theme::table_header()))
        .block(
            Block::default()
                .title(" Daily Usage ")
                .title_style(theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(self.border_style()),
        );
        frame.render_widget(table, area);
    }

    fn render_alerts(&self, frame: &mut Frame, area: Rect, detail: &Arc<DeviceDetail>) {
        let block = Block::default()
            .title(format!(" Alerts ({}) ", detail.alerts.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());

        if detail.alerts.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No alerts for this device", theme::key_hint()))
                    .block(block),
                area,
            );
            return;
        }

        let lines: Vec<Line> = detail
            .alerts
            .iter()
            .map(|a| {
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", a.severity),
                        Style::default().fg(theme::WARN_YELLOW),
                    ),
                    Span::styled(
                        format!("{} ", format_date(Some(&a.timestamp))),
                        theme::key_hint(),
                    ),
                    Span::raw(a.message.clone()),
                ])
            })
            .collect();
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

impl Component for DeviceDetailScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Enter | KeyCode::Backspace => Ok(Some(Action::GoBack)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DeviceDetailUpdated(state) => {
                self.detail = state.clone();
                Ok(None)
            }
            // A new drill-down starts from a clean slate so the previous
            // device's data never flashes up.
            Action::OpenDeviceDetail(_) => {
                self.detail = ViewState::Loading;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match &self.detail {
            ViewState::Loading => {
                frame.render_widget(
                    Paragraph::new("Loading device details…").style(theme::loading_text()),
                    area,
                );
            }
            ViewState::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(message.clone()).style(theme::error_text()),
                    area,
                );
            }
            ViewState::Ready(detail) => self.render_ready(frame, area, detail),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
