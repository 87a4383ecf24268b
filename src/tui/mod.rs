//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the transcript,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop redraws conditionally:
//!
//! - **Waiting** (a reply is pending): polls every ~80ms so the reply shows
//!   up promptly.
//! - **Idle**: sleeps up to 500ms and only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::ResponderKind;
use crate::core::action::{Action, Effect, ReplyRequest, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{AlertEvent, AlertKeys, InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Delay before the start-up greeting appears.
const GREETING_DELAY: Duration = Duration::from_secs(1);
const WAITING_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new(responder: ResponderKind) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(responder),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is ignored by terminals that lack it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(app.dispatcher.active());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if app.greeting.is_some() {
        spawn_greeting(tx.clone());
    }

    let mut needs_redraw = true;

    loop {
        // Sync InputBox props with App state
        tui.input_box.responder = app.dispatcher.active();
        tui.input_box.waiting = app.is_loading();

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading() {
            WAITING_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain everything pending before the next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::ForceQuit) {
                if let Effect::Quit = update(&mut app, Action::Quit) {
                    should_quit = true;
                }
                continue;
            }

            // An open alert swallows every key until dismissed
            if app.alert.is_some() {
                if let Some(AlertEvent::Dismiss) = AlertKeys.handle_event(&event) {
                    update(&mut app, Action::DismissAlert);
                }
                continue;
            }

            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
                    | TuiEvent::ScrollToBottom
            ) {
                tui.message_list.handle_event(&event);
                continue;
            }

            match tui.input_box.handle_event(&event) {
                Some(InputEvent::Submit(text)) => match update(&mut app, Action::Submit(text)) {
                    Effect::Dispatch(request) => {
                        tui.input_box.clear();
                        // New message from the user: follow it
                        tui.message_list.stick_to_bottom = true;
                        spawn_reply(request, tx.clone());
                    }
                    Effect::Rejected(e) => debug!("Input kept after rejection: {}", e),
                    Effect::Quit => should_quit = true,
                    Effect::None => {}
                },
                Some(InputEvent::CycleResponder) => {
                    update(&mut app, Action::CycleResponder);
                }
                Some(InputEvent::ContentChanged) | None => {}
            }
        }

        if should_quit {
            break;
        }

        // Actions produced by background tasks (replies, greeting)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if let Effect::Quit = update(&mut app, action) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Shutting down with {} messages", app.transcript.len());
    ratatui::restore();
    Ok(())
}

/// Runs the responder off the UI thread and feeds the reply back.
fn spawn_reply(request: ReplyRequest, tx: mpsc::Sender<Action>) {
    info!("Spawning reply for request {}", request.request_id);
    tokio::spawn(async move {
        let action = request.run().await;
        if tx.send(action).is_err() {
            warn!("Failed to send reply: receiver dropped");
        }
    });
}

fn spawn_greeting(tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        tokio::time::sleep(GREETING_DELAY).await;
        if tx.send(Action::Greet).is_err() {
            warn!("Failed to send greeting: receiver dropped");
        }
    });
}
