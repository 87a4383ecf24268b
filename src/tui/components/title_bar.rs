//! # TitleBar Component
//!
//! Top status bar: active responder, transient status, and a "↓ New" marker
//! when the user has scrolled away from the newest messages.
//!
//! Purely presentational. All three props come from elsewhere:
//! - `responder`: core App state (dispatcher binding)
//! - `status_message`: core App state ("Thinking...", "Responder: echo")
//! - `has_unseen_content`: TUI state (scroll position)
//!
//! Formatting, by priority:
//!
//! 1. `"Natter (responder: echo) | Thinking... | ↓ New"`
//! 2. `"Natter (responder: echo) | Thinking..."`
//! 3. `"Natter (responder: echo)"`

use crate::ResponderKind;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    pub responder: ResponderKind,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(responder: ResponderKind, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            responder,
            status_message,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mut title = format!("Natter (responder: {})", self.responder);
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            title.push_str(" | ↓ New");
        }
        title
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
