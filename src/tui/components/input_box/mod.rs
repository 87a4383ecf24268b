//! # InputBox Component
//!
//! The single-line text input plus the name of the responder the send action
//! is currently bound to.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit submission (Enter) and responder cycling (Ctrl+R)
//!
//! ## State Management
//!
//! The buffer is internal state. Submitting does *not* clear it: the parent
//! clears it with [`InputBox::clear`] once the core has accepted the message,
//! so rejected input stays in place for the user to fix.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::ResponderKind;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    wrap_line_count, wrap_options,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter with this buffer content
    Submit(String),
    /// User requested the next responder (Ctrl+R)
    CycleResponder,
    /// Text content or cursor changed
    ContentChanged,
}

/// Text input component with responder indicator.
///
/// # Props
///
/// - `responder`: responder the send action is bound to (from App state)
/// - `waiting`: a reply is pending, drawn dimmed
pub struct InputBox {
    pub buffer: String,
    pub responder: ResponderKind,
    pub waiting: bool,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(responder: ResponderKind) -> Self {
        Self {
            buffer: String::new(),
            responder,
            waiting: false,
            cursor: CursorState::new(),
        }
    }

    /// Empties the buffer after the core accepted a submission.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Calculate required height for current buffer content, clamped to viewport limits.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        let content_lines = wrap_line_count(&self.buffer, width);
        content_lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// The visible slice of wrapped lines for the current scroll offset.
    /// Wrapped with the same options as the cursor and height math.
    fn visible_text(&self, content_width: u16) -> String {
        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let title = format!("Input (Responder: {}) · Enter to send · Ctrl+R to switch", self.responder);
        let mut style = Style::default().fg(Color::Green);
        if self.waiting {
            style = style.add_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);
        let input = Paragraph::new(self.visible_text(area.width))
            .block(block)
            .style(style);

        frame.render_widget(input, area);

        let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor.pos, text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            // Validation is the core's job, so even blank input is submitted
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            TuiEvent::CycleResponder => Some(InputEvent::CycleResponder),
            _ => None,
        }
    }
}
