//! Test utilities for views and the app
//!
//! - [`RenderHarness`]: draw into an in-memory terminal and read the text back
//! - [`char_key`], [`key`], [`click`]: build input events
//!
//! # Example
//!
//! ```ignore
//! let mut render = RenderHarness::new(60, 24);
//! let output = render.render_to_string_plain(|frame| {
//!     settings.render(frame, frame.area(), SettingsViewProps { state: &state });
//! });
//! assert!(output.contains("Start Game"));
//! ```

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

use crate::event::EventKind;

/// Press of `code` with no modifiers
pub fn key(code: KeyCode) -> EventKind {
    EventKind::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Press of a character key with no modifiers
pub fn char_key(c: char) -> EventKind {
    key(KeyCode::Char(c))
}

/// Left mouse button press at a terminal cell
pub fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::empty(),
    })
}

/// In-memory terminal for render tests
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Never in practice; the test backend cannot fail to initialize.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("test backend always initializes");
        Self { terminal }
    }

    /// Draw one frame
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(draw)
            .expect("drawing to the test backend cannot fail");
        self.terminal.backend().buffer()
    }

    /// Buffer of the last drawn frame
    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text, one line per row, styles dropped
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let buffer = self.render(draw);
        buffer_to_string(buffer)
    }
}

/// Text content of a buffer with trailing spaces trimmed from each row
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
