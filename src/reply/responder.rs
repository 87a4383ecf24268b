use std::fmt;

use async_trait::async_trait;

use crate::core::validate::ValidText;

/// Failures a remote responder can run into before it has a reply.
///
/// These never leave the responder: each remote configuration turns them
/// into its own fallback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection-level failure (DNS, refused, reset).
    Network(String),
    /// No response within the configured bound.
    Timeout,
    /// Endpoint answered with a non-2xx status.
    Status(u16),
    /// Body was not the JSON shape this configuration expects.
    Parse(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Status(status) => write!(f, "request failed with status {status}"),
            TransportError::Parse(msg) => write!(f, "failed to parse response: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = e.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

/// A strategy that produces one reply for one validated message.
///
/// `respond` cannot fail. Anything that goes wrong is rendered as reply text
/// so the conversation always gets an answer.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Name used for logging and the status bar.
    fn name(&self) -> &str;

    async fn respond(&self, text: &ValidText) -> String;
}
