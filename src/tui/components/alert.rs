//! # Alert Overlay
//!
//! A centered modal box for notices that must be acknowledged, such as a
//! rejected message. While it is up the event loop routes every key to it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MAX_WIDTH: u16 = 60;
const HEIGHT: u16 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertEvent {
    Dismiss,
}

pub struct Alert<'a> {
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Centered rect for the popup inside `area`.
    pub fn popup_area(area: Rect) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(HEIGHT.min(area.height))])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(MAX_WIDTH.min(area.width))])
            .flex(Flex::Center)
            .areas(row);
        popup
    }
}

impl<'a> Component for Alert<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let popup = Self::popup_area(area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Notice ")
            .border_style(Style::default().fg(Color::Yellow));

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.message,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter or Esc to continue",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }
}

/// Stateless; any dismiss key closes it and everything else is swallowed.
pub struct AlertKeys;

impl EventHandler for AlertKeys {
    type Event = AlertEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Submit | TuiEvent::Escape => Some(AlertEvent::Dismiss),
            _ => None,
        }
    }
}
