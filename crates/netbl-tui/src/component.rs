//! Screen component trait.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// A full-screen view. The app loop feeds it key events and dispatched
/// actions; it draws itself into the content area each frame.
///
/// Screens hold no channel handles: anything they want done is returned
/// as an [`Action`] and routed by the app loop.
pub trait Component: Send {
    /// Handle a key event the app did not consume globally.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>>;

    /// Apply a dispatched action. May return a follow-up action.
    fn update(&mut self, action: &Action) -> Result<Option<Action>>;

    /// Draw into the given area.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Focus tracking, drives border highlighting.
    fn set_focused(&mut self, focused: bool);
}
