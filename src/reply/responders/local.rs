//! Offline responders.
//!
//! They answer without any network, after a fixed delay that imitates
//! a round trip so the "waiting for reply" state is visible in the UI.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use rand::Rng;

use crate::core::validate::ValidText;
use crate::reply::Responder;

pub const DEFAULT_ECHO_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_CANNED_DELAY: Duration = Duration::from_millis(800);
pub const DEFAULT_KEYWORD_DELAY: Duration = Duration::from_millis(600);

pub const CANNED_REPLIES: [&str; 5] = [
    "That's an interesting point!",
    "Could you tell me more about that?",
    "I see, any other thoughts?",
    "That's a really inspiring idea!",
    "Thanks for sharing your thoughts!",
];

const GREETING_REPLY: &str = "Hello! Nice to chat with you!";
const HELP_REPLY: &str = "I can chat with you, feel free to type anything!";

// ============================================================================
// Echo
// ============================================================================

pub struct EchoResponder {
    delay: Duration,
}

impl EchoResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for EchoResponder {
    fn default() -> Self {
        Self::new(DEFAULT_ECHO_DELAY)
    }
}

#[async_trait]
impl Responder for EchoResponder {
    fn name(&self) -> &str {
        "echo"
    }

    async fn respond(&self, text: &ValidText) -> String {
        tokio::time::sleep(self.delay).await;
        format!("you said: {text}")
    }
}

// ============================================================================
// Canned
// ============================================================================

/// Picks one of [`CANNED_REPLIES`] uniformly at random. Not seeded.
pub struct CannedResponder {
    delay: Duration,
}

impl CannedResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new(DEFAULT_CANNED_DELAY)
    }
}

#[async_trait]
impl Responder for CannedResponder {
    fn name(&self) -> &str {
        "canned"
    }

    async fn respond(&self, _text: &ValidText) -> String {
        tokio::time::sleep(self.delay).await;
        let idx = rand::rng().random_range(0..CANNED_REPLIES.len());
        debug!("canned reply #{idx}");
        CANNED_REPLIES[idx].to_string()
    }
}

// ============================================================================
// Keyword
// ============================================================================

/// What a matched keyword rule answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeywordReply {
    Greeting,
    Help,
    Time,
}

/// Checked top to bottom against the lower-cased input; first hit wins.
const KEYWORD_RULES: [(&[&str], KeywordReply); 3] = [
    (&["你好", "hello"], KeywordReply::Greeting),
    (&["帮助", "help"], KeywordReply::Help),
    (&["时间", "time"], KeywordReply::Time),
];

fn match_rule(text: &str) -> Option<KeywordReply> {
    let lower = text.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, reply)| *reply)
}

fn keyword_reply(text: &str) -> String {
    match match_rule(text) {
        Some(KeywordReply::Greeting) => GREETING_REPLY.to_string(),
        Some(KeywordReply::Help) => HELP_REPLY.to_string(),
        Some(KeywordReply::Time) => format!(
            "Current time: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
        None => format!("I received your message: \"{text}\""),
    }
}

pub struct KeywordResponder {
    delay: Duration,
}

impl KeywordResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD_DELAY)
    }
}

#[async_trait]
impl Responder for KeywordResponder {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn respond(&self, text: &ValidText) -> String {
        tokio::time::sleep(self.delay).await;
        keyword_reply(text.as_str())
    }
}
