//! Natter library exports for testing

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod reply;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Every responder the send action can be bound to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponderKind {
    /// POST to `/api/chat`, apology on failure
    Api,
    /// POST to `/api/chat`, failure detail shown in the transcript
    ApiVerbose,
    /// POST to the standalone chat server (`/chat`, `reply` field)
    ChatServer,
    Echo,
    Canned,
    #[default]
    Keyword,
}

impl ResponderKind {
    pub const ALL: [ResponderKind; 6] = [
        ResponderKind::Api,
        ResponderKind::ApiVerbose,
        ResponderKind::ChatServer,
        ResponderKind::Echo,
        ResponderKind::Canned,
        ResponderKind::Keyword,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResponderKind::Api => "api",
            ResponderKind::ApiVerbose => "api-verbose",
            ResponderKind::ChatServer => "chat-server",
            ResponderKind::Echo => "echo",
            ResponderKind::Canned => "canned",
            ResponderKind::Keyword => "keyword",
        }
    }

    /// Looks a kind up by name. Unknown names fall back to `Keyword`.
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim().to_ascii_lowercase();
        match Self::ALL.into_iter().find(|kind| kind.name() == wanted) {
            Some(kind) => kind,
            None => {
                log::warn!("Unknown responder '{}', falling back to keyword", name);
                ResponderKind::Keyword
            }
        }
    }

    /// Next kind in the cycle order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ResponderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
