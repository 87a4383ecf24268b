//! # Application State
//!
//! Core business state for Natter. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── dispatcher: Dispatcher         // responders + the active binding
//! ├── transcript: Transcript         // append-only conversation
//! ├── status_message: String         // status bar text
//! ├── alert: Option<String>          // blocking notice (validation errors)
//! ├── pending: Option<u64>           // id of the reply in flight
//! └── greeting: Option<String>       // start-up greeting not shown yet
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::dispatch::Dispatcher;
use crate::core::message::Transcript;

pub struct App {
    pub dispatcher: Dispatcher,
    pub transcript: Transcript,
    pub status_message: String,
    /// Modal notice; while set, sends are blocked until it is dismissed.
    pub alert: Option<String>,
    /// Single in-flight slot: the request id we are waiting on.
    pub pending: Option<u64>,
    pub greeting: Option<String>,
    next_request_id: u64,
}

impl App {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            transcript: Transcript::new(),
            status_message: String::from("Welcome to Natter!"),
            alert: None,
            pending: None,
            greeting: None,
            next_request_id: 1,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(Dispatcher::from_config(config));
        app.greeting = config.greeting.clone();
        app
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Hands out a fresh request id.
    pub(crate) fn issue_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}
