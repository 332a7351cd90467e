//! Usage meter: a labeled gauge whose fill color follows the
//! 70% / 90% warning thresholds.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Gauge};

use crate::theme;

/// Render a one-line meter with a title and a value label.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_meter(frame: &mut Frame, area: Rect, title: &str, label: String, pct: f64) {
    let clamped = pct.clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .block(Block::default().title(title.to_owned()).title_style(theme::title_style()))
        .gauge_style(Style::default().fg(theme::meter_color(clamped)))
        .percent(clamped.round() as u16)
        .label(label);
    frame.render_widget(gauge, area);
}
