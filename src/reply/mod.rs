//! # Responders
//!
//! Everything that can answer a user message. The rest of the app only sees
//! the [`Responder`] trait; which concrete responder is behind it is decided
//! by the dispatcher.

pub mod responder;
pub mod responders;

pub use responder::{Responder, TransportError};
pub use responders::{
    API_APOLOGY, CANNED_REPLIES, CHAT_SERVER_APOLOGY, CannedResponder, EchoResponder,
    FailureReply, KeywordResponder, RemoteResponder, ReplyShape,
};
