//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Display messages in transcript order
//! - Keep the newest message in view unless the user scrolled away
//! - Cache message heights (transcript entries never change, so a height
//!   stays valid until the width does)
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the transcript (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    fn max_scroll(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Whether messages exist below the visible area.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_scroll()
    }
}

/// Scrollable transcript view.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub is_waiting: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, transcript: &'a Transcript, is_waiting: bool) -> Self {
        Self {
            state,
            transcript,
            is_waiting,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let messages = self.transcript.messages();

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in messages.iter().skip(layout.heights.len()) {
            layout.heights.push(Message::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.content_width = content_width;

        // One extra row at the bottom for the waiting indicator
        let indicator_height = u16::from(self.is_waiting);
        let canvas_height = layout.total_height().saturating_add(indicator_height);

        // 2. Follow the bottom, or clamp a manual scroll position
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            self.state.scroll_state.set_offset(Position {
                x: 0,
                y: canvas_height.saturating_sub(area.height),
            });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(&messages[i]), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.is_waiting {
            let rect = Rect::new(0, self.state.layout.total_height(), content_width, 1);
            let indicator = Span::styled(
                " assistant is thinking...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            scroll_view.render_widget(indicator, rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Event handling lives on the persistent state since `MessageList` is
/// rebuilt every frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// How many cached heights are still valid.
    ///
    /// Messages are immutable, so only a width change invalidates entries.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if content_width != self.content_width {
            0
        } else {
            self.heights.len().min(message_count)
        }
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Indices of messages intersecting the viewport, padded by half a screen
    /// on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.content_width = 80;
        cache.heights = vec![1; 5];

        // Same width: everything cached stays valid
        assert_eq!(cache.reusable_count(5, 80), 5);
        // New message appended: the 5 old heights are reused
        assert_eq!(cache.reusable_count(6, 80), 5);
        // Width changed: nothing reusable
        assert_eq!(cache.reusable_count(5, 40), 0);
    }

    #[test]
    fn test_prefix_heights_and_total() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3, 4, 5];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.prefix_heights, vec![3, 7, 12]);
        assert_eq!(cache.total_height(), 12);
    }

    #[test]
    fn test_visible_range_skips_far_messages() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![10; 10];
        cache.rebuild_prefix_heights();
        // Viewport 10 rows at offset 50, padded by 5 rows each side: rows 45..65
        assert_eq!(cache.visible_range(50, 10), 4..7);
        assert_eq!(cache.visible_range(0, 10), 0..2);
    }

    #[test]
    fn test_render_shows_messages_in_order() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "你好");
        transcript.append(Role::Assistant, "you said: 你好");

        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(&mut state, &transcript, false).render(f, area)
            })
            .unwrap();

        let text = screen_text(&terminal);
        let user_at = text.find("you").unwrap();
        let assistant_at = text.find("assistant").unwrap();
        assert!(user_at < assistant_at);
        assert!(text.contains("said:"));
        assert_eq!(state.layout.heights, vec![3, 3]);
    }

    #[test]
    fn test_sticks_to_bottom_as_messages_arrive() {
        let mut transcript = Transcript::new();
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();

        for i in 0..10 {
            transcript.append(Role::User, format!("message {i}"));
            terminal
                .draw(|f| {
                    let area = f.area();
                    MessageList::new(&mut state, &transcript, false).render(f, area)
                })
                .unwrap();
        }

        let text = screen_text(&terminal);
        assert!(text.contains("message 9"));
        assert!(!text.contains("message 0"));
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_scroll_up_detaches_and_end_repins() {
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.append(Role::Assistant, format!("reply {i}"));
        }
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(&mut state, &transcript, false).render(f, area)
            })
            .unwrap();

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        assert!(state.has_unseen_content());

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_waiting_indicator() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "hi");
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(&mut state, &transcript, true).render(f, area)
            })
            .unwrap();

        assert!(screen_text(&terminal).contains("thinking"));
    }

    #[test]
    fn test_saturated_canvas_renders_while_waiting() {
        let mut transcript = Transcript::new();
        // Each message wraps to ~40k rows at this width; two overflow u16
        for _ in 0..2 {
            transcript.append(Role::Assistant, "x".repeat(600_000));
        }
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(&mut state, &transcript, true).render(f, area)
            })
            .unwrap();

        assert_eq!(state.layout.total_height(), u16::MAX);
        assert!(state.stick_to_bottom);
    }
}
