//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use netbl_core::{Monitor, ReportPeriod};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge::run_data_bridge;
use crate::event::{Event, TerminalEvents};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::TerminalGuard;

/// Top-level application state and event loop.
pub struct App {
    monitor: Monitor,
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Window the Reports screen last asked for; re-requested on re-entry.
    report_period: ReportPeriod,
    /// Device currently shown in the detail view.
    detail_device: Option<i64>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(monitor: Monitor) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> = create_screens().into_iter().collect();

        Self {
            monitor,
            active_screen: ScreenId::Dashboard,
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            report_period: ReportPeriod::default(),
            detail_device: None,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = TerminalGuard::enter()?;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }

        let mut events = TerminalEvents::spawn();

        // Store changes flow back in as actions.
        let bridge_cancel = CancellationToken::new();
        tokio::spawn(run_data_bridge(
            self.monitor.clone(),
            self.action_tx.clone(),
            bridge_cancel.clone(),
        ));

        // Dashboard is the initial screen, so the poll loop starts now
        // and delivers the first summary immediately.
        self.monitor.start_polling();

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        bridge_cancel.cancel();
        drop(events);
        self.monitor.stop_polling();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else is delegated to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    Ok(Some(Action::ToggleHelp))
                }
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='3')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action: update app state and propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::SwitchScreen(target) => {
                self.switch_screen(*target);
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::OpenDeviceDetail(id) => {
                self.detail_device = Some(*id);
                self.monitor.request_device_detail(*id);
                // The detail screen resets itself on this action.
                self.broadcast(action)?;
                self.action_tx
                    .send(Action::SwitchScreen(ScreenId::DeviceDetail))?;
            }

            Action::SetReportPeriod(period) => {
                self.report_period = *period;
                self.monitor.request_report(*period);
            }

            Action::Refresh => match self.active_screen {
                ScreenId::Dashboard => self.monitor.request_summary(),
                ScreenId::Devices => self.monitor.request_devices(),
                ScreenId::DeviceDetail => {
                    if let Some(id) = self.detail_device {
                        self.monitor.request_device_detail(id);
                    }
                }
                ScreenId::Reports => self.monitor.request_report(self.report_period),
            },

            // Data updates go to every screen; each keeps what it needs.
            Action::SummaryUpdated(_)
            | Action::DevicesUpdated(_)
            | Action::DeviceDetailUpdated(_)
            | Action::ReportUpdated(_) => {
                self.broadcast(action)?;
            }

            // Render is handled in the main loop, not here
            Action::Render | Action::Tick | Action::Resize(..) => {}
        }

        Ok(())
    }

    /// Deliver an action to all screens, queueing any follow-ups.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Change the active screen, fetching whatever it displays. The
    /// summary poll runs only while the dashboard is showing.
    fn switch_screen(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} to {}", self.active_screen, target);

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        let leaving = self.active_screen;
        // Detail is a drill-down: Esc from its parent must not bounce
        // back into a stale detail view.
        self.previous_screen = (leaving != ScreenId::DeviceDetail).then_some(leaving);
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }

        if leaving == ScreenId::Dashboard {
            self.monitor.stop_polling();
        }
        match target {
            ScreenId::Dashboard => self.monitor.start_polling(),
            ScreenId::Devices => self.monitor.request_devices(),
            ScreenId::Reports => self.monitor.request_report(self.report_period),
            // OpenDeviceDetail already kicked off the fetch.
            ScreenId::DeviceDetail => {}
        }
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen.tab() {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen.tab())
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let poll_indicator = if self.monitor.is_polling() {
            Span::styled("● live", Style::default().fg(theme::OK_GREEN))
        } else {
            Span::styled("○ paused", Style::default().fg(theme::DIM_TEXT))
        };

        let age = match self.monitor.store().data_age() {
            Some(age) => format!("  updated {}s ago", age.num_seconds().max(0)),
            None => "  no data yet".to_string(),
        };

        let line = Line::from(vec![
            Span::raw(" "),
            poll_indicator,
            Span::styled(age, theme::key_hint()),
            Span::styled("  │ ? help  q quit", theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 54u16.min(area.width.saturating_sub(4));
        let help_height = 18u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        // Clear the background behind the overlay
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_HIGHLIGHT)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let hint = |key: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(desc.to_string(), theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Navigation",
                Style::default().fg(theme::ACCENT_BLUE),
            )),
            hint("1-3", "Jump to screen"),
            hint("Tab", "Next screen"),
            hint("j/k ↑/↓", "Move selection"),
            hint("g/G", "Top / bottom"),
            hint("Enter", "Open device detail"),
            hint("Esc", "Back"),
            Line::from(""),
            Line::from(Span::styled(
                "  Data",
                Style::default().fg(theme::ACCENT_BLUE),
            )),
            hint("r", "Refresh current view"),
            hint("d/w/m", "Report window (Reports)"),
            Line::from(""),
            hint("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                    Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbl_core::MonitorConfig;

    fn test_app() -> App {
        let monitor = Monitor::new(MonitorConfig::default()).expect("monitor");
        App::new(monitor)
    }

    fn drain_actions(app: &mut App) {
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(&action).expect("process action");
        }
    }

    #[tokio::test]
    async fn second_esc_stays_on_device_list() {
        let mut app = test_app();
        app.process_action(&Action::SwitchScreen(ScreenId::Devices))
            .expect("switch to devices");
        app.process_action(&Action::OpenDeviceDetail(3))
            .expect("open detail");
        drain_actions(&mut app);
        assert_eq!(app.active_screen, ScreenId::DeviceDetail);

        // Esc returns to the device list.
        app.process_action(&Action::GoBack).expect("go back");
        drain_actions(&mut app);
        assert_eq!(app.active_screen, ScreenId::Devices);
        assert_eq!(app.previous_screen, None);

        // A second Esc stays put instead of re-entering a stale
        // detail view.
        app.process_action(&Action::GoBack).expect("go back again");
        drain_actions(&mut app);
        assert_eq!(app.active_screen, ScreenId::Devices);
    }
}
