//! Devices screen: table of every known device with monthly usage.
//! Enter opens the detail view for the selected device.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use netbl_core::format::{format_bytes, format_date};
use netbl_core::{Device, ViewState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct DevicesScreen {
    focused: bool,
    devices: ViewState<Vec<Device>>,
    table_state: TableState,
}

impl DevicesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            devices: ViewState::Loading,
            table_state: TableState::default(),
        }
    }

    fn device_count(&self) -> usize {
        self.devices.data().map_or(0, |d| d.len())
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_device(&self) -> Option<&Device> {
        self.devices
            .data()
            .and_then(|d| d.get(self.selected_index()))
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.device_count();
        if count == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let next = (self.selected_index() as isize + delta).clamp(0, count as isize - 1);
        #[allow(clippy::cast_sign_loss)]
        self.table_state.select(Some(next as usize));
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, devices: &Arc<Vec<Device>>) {
        let rows: Vec<Row> = devices
            .iter()
            .map(|d| {
                Row::new(vec![
                    Cell::from(d.id.to_string()),
                    Cell::from(d.name.clone()),
                    Cell::from(d.ip.clone()),
                    Cell::from(d.device_type.to_string()),
                    Cell::from(format_bytes(d.month_total())),
                    Cell::from(format_date(d.last_seen.as_deref())),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Min(16),
                Constraint::Length(16),
                Constraint::Length(14),
                Constraint::Length(12),
                Constraint::Length(20),
            ],
        )
        .header(
            Row::new(vec!["ID", "Name", "IP", "Type", "This Month", "Last Seen"])
                .style(theme::table_header()),
        )
        .row_highlight_style(theme::table_selected())
        .block(
            Block::default()
                .title(format!(" Devices ({}) ", devices.len()))
                .title_style(theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if self.focused {
                    theme::border_focused()
                } else {
                    theme::border_default()
                }),
        );

        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl Component for DevicesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.table_state.select(Some(0));
                Ok(None)
            }
            KeyCode::Char('G') => {
                let count = self.device_count();
                self.table_state.select(Some(count.saturating_sub(1)));
                Ok(None)
            }
            KeyCode::Enter => Ok(self
                .selected_device()
                .map(|d| Action::OpenDeviceDetail(d.id))),
            KeyCode::Char('r') => Ok(Some(Action::Refresh)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::DevicesUpdated(state) = action {
            self.devices = state.clone();
            if self.table_state.selected().is_none() && self.device_count() > 0 {
                self.table_state.select(Some(0));
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match &self.devices {
            ViewState::Loading => {
                frame.render_widget(
                    Paragraph::new("Loading devices…").style(theme::loading_text()),
                    area,
                );
            }
            ViewState::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(message.clone()).style(theme::error_text()),
                    area,
                );
            }
            ViewState::Ready(devices) => self.render_table(frame, area, devices),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
