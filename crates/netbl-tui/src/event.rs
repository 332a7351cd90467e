//! Terminal input merged with fixed-cadence tick and render events.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Cadence for [`Event::Tick`]: status-bar freshness updates.
pub const TICK_RATE: Duration = Duration::from_millis(250);
/// Cadence for [`Event::Render`]: roughly 30 frames per second.
pub const RENDER_RATE: Duration = Duration::from_millis(33);

#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Periodic tick for staleness checks.
    Tick,
    /// Frame is due.
    Render,
}

/// Merges crossterm input with the tick and render intervals on a
/// background task. Dropping the handle aborts the reader.
pub struct TerminalEvents {
    rx: mpsc::UnboundedReceiver<Event>,
    reader: JoinHandle<()>,
}

impl TerminalEvents {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let reader = tokio::spawn(read_events(tx));
        Self { rx, reader }
    }

    /// Next event, or `None` once the reader has shut down.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for TerminalEvents {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

async fn read_events(tx: mpsc::UnboundedSender<Event>) {
    let mut input = EventStream::new();
    let mut tick = interval(TICK_RATE);
    let mut render = interval(RENDER_RATE);
    // A stalled frame is skipped, never replayed as a burst.
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    render.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            Some(Ok(input_event)) = input.next() => match input_event {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
                CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                // Key release/repeat, mouse, and focus events are ignored.
                _ => continue,
            },
        };

        if tx.send(event).is_err() {
            return;
        }
    }
}
