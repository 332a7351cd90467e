//! Reports screen: usage series for a selectable window (d/w/m keys),
//! rendered as a bar chart plus totals.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph};

use netbl_core::format::format_bytes;
use netbl_core::{ReportPeriod, UsageReport, ViewState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct ReportsScreen {
    focused: bool,
    period: ReportPeriod,
    report: ViewState<UsageReport>,
}

impl ReportsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            period: ReportPeriod::default(),
            report: ViewState::Loading,
        }
    }

    fn select_period(&mut self, period: ReportPeriod) -> Option<Action> {
        if period == self.period {
            return None;
        }
        self.period = period;
        Some(Action::SetReportPeriod(period))
    }

    fn render_ready(&self, frame: &mut Frame, area: Rect, report: &Arc<UsageReport>) {
        let layout = Layout::vertical([
            Constraint::Length(1), // period selector
            Constraint::Min(6),    // chart
            Constraint::Length(2), // totals
        ])
        .split(area);

        self.render_selector(frame, layout[0]);
        self.render_chart(frame, layout[1], report);
        self.render_totals(frame, layout[2], report);
    }

    fn render_selector(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for period in ReportPeriod::ALL {
            let style = if period == self.period {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            spans.push(Span::styled(format!(" {} ", period.label()), style));
        }
        spans.push(Span::styled("  (d/w/m to switch)", theme::key_hint()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, report: &Arc<UsageReport>) {
        let bars: Vec<Bar> = report
            .data
            .iter()
            .map(|p| {
                Bar::default()
                    .label(Line::from(p.date.clone()))
                    .value(p.total)
                    .text_value(format_bytes(p.total))
            })
            .collect();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .title(format!(" Usage: {} ", report.period.label()))
                    .title_style(theme::title_style())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(if self.focused {
                        theme::border_focused()
                    } else {
                        theme::border_default()
                    }),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(8)
            .bar_gap(1)
            .bar_style(Style::default().fg(theme::DOWNLOAD_CYAN));
        frame.render_widget(chart, area);
    }

    fn render_totals(&self, frame: &mut Frame, area: Rect, report: &Arc<UsageReport>) {
        let line = Line::from(vec![
            Span::styled(" Download: ", theme::key_hint()),
            Span::raw(format_bytes(report.total_download())),
            Span::styled("   Upload: ", theme::key_hint()),
            Span::raw(format_bytes(report.total_upload())),
            Span::styled("   Total: ", theme::key_hint()),
            Span::raw(format_bytes(report.total())),
            Span::styled("   Avg/bucket: ", theme::key_hint()),
            Span::raw(format_bytes(report.average())),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for ReportsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('d') => Ok(self.select_period(ReportPeriod::Daily)),
            KeyCode::Char('w') => Ok(self.select_period(ReportPeriod::Weekly)),
            KeyCode::Char('m') => Ok(self.select_period(ReportPeriod::Monthly)),
            KeyCode::Char('r') => Ok(Some(Action::SetReportPeriod(self.period))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ReportUpdated(state) = action {
            self.report = state.clone();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match &self.report {
            ViewState::Loading => {
                frame.render_widget(
                    Paragraph::new("Loading report data…").style(theme::loading_text()),
                    area,
                );
            }
            ViewState::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(message.clone()).style(theme::error_text()),
                    area,
                );
            }
            ViewState::Ready(report) => self.render_ready(frame, area, report),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
