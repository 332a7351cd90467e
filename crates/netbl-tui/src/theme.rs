//! Color palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ACCENT_BLUE: Color = Color::Rgb(97, 175, 239); // #61afef
pub const DOWNLOAD_CYAN: Color = Color::Rgb(86, 182, 194); // #56b6c2
pub const OK_GREEN: Color = Color::Rgb(152, 195, 121); // #98c379
pub const WARN_YELLOW: Color = Color::Rgb(229, 192, 123); // #e5c07b
pub const ERROR_RED: Color = Color::Rgb(224, 108, 117); // #e06c75

pub const DIM_TEXT: Color = Color::Rgb(130, 137, 151); // #828997
pub const BORDER_GRAY: Color = Color::Rgb(76, 82, 99); // #4c5263
pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 49, 60); // #2c313c

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(ACCENT_BLUE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(ACCENT_BLUE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(ACCENT_BLUE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_TEXT)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD)
}

/// Error message text for failed views.
pub fn error_text() -> Style {
    Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD)
}

/// Loading placeholder text.
pub fn loading_text() -> Style {
    Style::default().fg(DIM_TEXT).add_modifier(Modifier::ITALIC)
}

/// Fill color for a usage meter at the given percentage.
///
/// Green below 70%, yellow from 70%, red from 90%. Mirrors the alert
/// thresholds the backend uses for usage warnings.
pub fn meter_color(pct: f64) -> Color {
    if pct >= 90.0 {
        ERROR_RED
    } else if pct >= 70.0 {
        WARN_YELLOW
    } else {
        OK_GREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_thresholds() {
        assert_eq!(meter_color(0.0), OK_GREEN);
        assert_eq!(meter_color(69.9), OK_GREEN);
        assert_eq!(meter_color(70.0), WARN_YELLOW);
        assert_eq!(meter_color(89.9), WARN_YELLOW);
        assert_eq!(meter_color(90.0), ERROR_RED);
        assert_eq!(meter_color(100.0), ERROR_RED);
    }
}
