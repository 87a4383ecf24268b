//! # Actions
//!
//! Everything that can happen in Natter becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! A responder answers? That's `Action::ReplyReady { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` telling the adapter what I/O to start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! One send action walks this path:
//!
//! ```text
//! Idle → Validating ─┬─ Rejected → Idle
//!                    └─ Accepted → Rendered(user) → AwaitingReply → Rendered(reply) → Idle
//! ```

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::ResponderKind;
use crate::core::message::Role;
use crate::core::state::App;
use crate::core::validate::{ValidText, ValidationError, validate};
use crate::reply::Responder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Raw text from the input box.
    Submit(String),
    /// A responder finished.
    ReplyReady { request_id: u64, text: String },
    /// Bind the send action to another responder.
    Bind(ResponderKind),
    /// Bind the next responder in cycle order.
    CycleResponder,
    /// Show the start-up greeting.
    Greet,
    DismissAlert,
    Quit,
}

/// A reply the adapter must produce off the UI thread.
pub struct ReplyRequest {
    pub request_id: u64,
    pub responder: Arc<dyn Responder>,
    pub text: ValidText,
}

impl ReplyRequest {
    /// Runs the responder and wraps its answer as the action to feed back.
    pub async fn run(self) -> Action {
        let text = self.responder.respond(&self.text).await;
        Action::ReplyReady {
            request_id: self.request_id,
            text,
        }
    }
}

impl fmt::Debug for ReplyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyRequest")
            .field("request_id", &self.request_id)
            .field("responder", &self.responder.name())
            .field("text", &self.text)
            .finish()
    }
}

#[derive(Debug)]
pub enum Effect {
    None,
    /// Input failed validation; the alert is set and the input must be kept.
    Rejected(ValidationError),
    /// User message is on the transcript; clear the input and run the request.
    Dispatch(ReplyRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(raw) => submit(app, &raw),
        Action::ReplyReady { request_id, text } => {
            debug!("Reply for request {} ({} bytes)", request_id, text.len());
            app.transcript.append(Role::Assistant, text);
            if app.pending == Some(request_id) {
                app.pending = None;
                app.status_message.clear();
            }
            Effect::None
        }
        Action::Bind(kind) => {
            app.dispatcher.bind(kind);
            app.status_message = format!("Responder: {kind}");
            Effect::None
        }
        Action::CycleResponder => {
            let next = app.dispatcher.active().next();
            update(app, Action::Bind(next))
        }
        Action::Greet => {
            if let Some(greeting) = app.greeting.take() {
                app.transcript.append(Role::Assistant, greeting);
            }
            Effect::None
        }
        Action::DismissAlert => {
            app.alert = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, raw: &str) -> Effect {
    if app.alert.is_some() {
        return Effect::None;
    }
    if app.is_loading() {
        app.status_message = String::from("Still waiting for the previous reply...");
        return Effect::None;
    }

    let text = match validate(raw) {
        Ok(text) => text,
        Err(e) => {
            warn!("Rejected input: {}", e);
            app.alert = Some(e.to_string());
            return Effect::Rejected(e);
        }
    };

    let kind = app.dispatcher.active();
    let Some(responder) = app.dispatcher.responder() else {
        warn!("No responder registered for {}", kind);
        app.alert = Some(format!("No responder available for '{kind}'"));
        return Effect::None;
    };

    app.transcript.append(Role::User, text.as_str());
    let request_id = app.issue_request_id();
    app.pending = Some(request_id);
    app.status_message = String::from("Thinking...");
    info!("Dispatching request {} to {}", request_id, kind);

    Effect::Dispatch(ReplyRequest {
        request_id,
        responder,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;
    use crate::test_support::{test_app, test_app_with};

    fn dispatched(effect: Effect) -> ReplyRequest {
        match effect {
            Effect::Dispatch(request) => request,
            other => panic!("Expected Dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_submit_is_rejected_with_alert() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("   ".to_string()));
        assert!(matches!(effect, Effect::Rejected(ValidationError::EmptyInput)));
        assert_eq!(app.alert.as_deref(), Some("Please enter a message first"));
        assert!(app.transcript.is_empty());
        assert!(!app.is_loading());
    }

    #[test]
    fn test_too_long_submit_is_rejected() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("x".repeat(501)));
        assert!(matches!(
            effect,
            Effect::Rejected(ValidationError::TooLong { len: 501 })
        ));
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_alert_blocks_until_dismissed() {
        let mut app = test_app();
        update(&mut app, Action::Submit(String::new()));
        let effect = update(&mut app, Action::Submit("hello".to_string()));
        assert!(matches!(effect, Effect::None));
        assert!(app.transcript.is_empty());

        update(&mut app, Action::DismissAlert);
        let effect = update(&mut app, Action::Submit("hello".to_string()));
        assert!(matches!(effect, Effect::Dispatch(_)));
    }

    #[test]
    fn test_accepted_submit_renders_trimmed_user_message() {
        let mut app = test_app();
        let request = dispatched(update(&mut app, Action::Submit("  hi  ".to_string())));
        assert_eq!(request.text.as_str(), "hi");
        assert_eq!(app.transcript.messages(), &[Message::user("hi")]);
        assert_eq!(app.pending, Some(request.request_id));
        assert_eq!(app.status_message, "Thinking...");
    }

    #[test]
    fn test_submit_while_pending_is_refused() {
        let mut app = test_app();
        dispatched(update(&mut app, Action::Submit("one".to_string())));
        let effect = update(&mut app, Action::Submit("two".to_string()));
        assert!(matches!(effect, Effect::None));
        assert_eq!(app.transcript.len(), 1);
        assert!(app.status_message.contains("waiting"));
    }

    #[test]
    fn test_reply_ready_renders_and_frees_slot() {
        let mut app = test_app();
        let request = dispatched(update(&mut app, Action::Submit("one".to_string())));
        update(
            &mut app,
            Action::ReplyReady {
                request_id: request.request_id,
                text: "answer".to_string(),
            },
        );
        assert_eq!(
            app.transcript.messages(),
            &[Message::user("one"), Message::assistant("answer")]
        );
        assert!(!app.is_loading());
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn test_bind_and_cycle() {
        let mut app = test_app();
        update(&mut app, Action::Bind(ResponderKind::Echo));
        assert_eq!(app.dispatcher.active(), ResponderKind::Echo);
        assert_eq!(app.status_message, "Responder: echo");

        update(&mut app, Action::CycleResponder);
        assert_eq!(app.dispatcher.active(), ResponderKind::Canned);
    }

    #[test]
    fn test_unregistered_responder_alerts() {
        let mut app = test_app_with(&[]);
        let effect = update(&mut app, Action::Submit("hi".to_string()));
        assert!(matches!(effect, Effect::None));
        assert!(app.alert.is_some());
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_greet_only_once() {
        let mut app = test_app();
        app.greeting = Some("welcome".to_string());
        update(&mut app, Action::Greet);
        update(&mut app, Action::Greet);
        assert_eq!(app.transcript.messages(), &[Message::assistant("welcome")]);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert!(matches!(update(&mut app, Action::Quit), Effect::Quit));
    }

    #[tokio::test]
    async fn test_reply_request_run_uses_its_own_responder() {
        let mut app = test_app();
        let request = dispatched(update(&mut app, Action::Submit("ping".to_string())));
        update(&mut app, Action::Bind(ResponderKind::Canned));

        let action = request.run().await;
        update(&mut app, action);
        assert_eq!(
            app.transcript.last(),
            Some(&Message::assistant("stub:keyword:ping"))
        );
    }
}
