//! JSON-over-HTTP responders.
//!
//! Every remote configuration sends the same request body,
//! `{"message": "<text>"}`, but the endpoints disagree on where the reply
//! lives in the response. Each shape gets its own typed body so a
//! `{"reply": ...}` answer is never accepted by a configuration that expects
//! `{"response": ...}`, and vice versa.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::validate::ValidText;
use crate::reply::{Responder, TransportError};

/// Fallback shown when the `/api/chat` endpoint fails.
pub const API_APOLOGY: &str = "Sorry, something went wrong while sending your message.";
/// Fallback shown when the standalone chat server cannot be reached.
pub const CHAT_SERVER_APOLOGY: &str =
    "Failed to reach the server, please check the network and server settings.";

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// `{"response": "..."}`
#[derive(Deserialize, Debug)]
struct ResponseBody {
    response: String,
}

/// `{"reply": "..."}`
#[derive(Deserialize, Debug)]
struct ReplyBody {
    reply: String,
}

/// Which field of the JSON response carries the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// `/api/chat` style: `{"response": ...}`
    Response,
    /// Chat server style: `{"reply": ...}`
    Reply,
}

impl ReplyShape {
    fn field(self) -> &'static str {
        match self {
            ReplyShape::Response => "response",
            ReplyShape::Reply => "reply",
        }
    }

    fn extract(self, body: &[u8]) -> Result<String, TransportError> {
        let parsed = match self {
            ReplyShape::Response => serde_json::from_slice::<ResponseBody>(body).map(|b| b.response),
            ReplyShape::Reply => serde_json::from_slice::<ReplyBody>(body).map(|b| b.reply),
        };
        parsed.map_err(|e| TransportError::Parse(e.to_string()))
    }
}

/// How a transport failure is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReply {
    /// Always the same fixed text.
    Apology(String),
    /// `"Error: <detail>"` with the transport error spelled out.
    Detailed,
}

impl FailureReply {
    fn render(&self, error: &TransportError) -> String {
        match self {
            FailureReply::Apology(text) => text.clone(),
            FailureReply::Detailed => format!("Error: {error}"),
        }
    }
}

pub struct RemoteResponder {
    name: String,
    url: String,
    shape: ReplyShape,
    failure: FailureReply,
    timeout: Duration,
    client: reqwest::Client,
}

impl RemoteResponder {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        shape: ReplyShape,
        failure: FailureReply,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            shape,
            failure,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    /// `POST {base_url}/api/chat`, `response` field, fixed apology on failure.
    pub fn api(base_url: &str, timeout: Duration) -> Self {
        Self::new(
            "api",
            api_chat_url(base_url),
            ReplyShape::Response,
            FailureReply::Apology(API_APOLOGY.to_string()),
            timeout,
        )
    }

    /// Same endpoint as [`RemoteResponder::api`], but failures are spelled out.
    pub fn api_verbose(base_url: &str, timeout: Duration) -> Self {
        Self::new(
            "api-verbose",
            api_chat_url(base_url),
            ReplyShape::Response,
            FailureReply::Detailed,
            timeout,
        )
    }

    /// The standalone chat server, `reply` field.
    pub fn chat_server(url: &str, timeout: Duration) -> Self {
        Self::new(
            "chat-server",
            url,
            ReplyShape::Reply,
            FailureReply::Apology(CHAT_SERVER_APOLOGY.to_string()),
            timeout,
        )
    }

    async fn request(&self, text: &str) -> Result<String, TransportError> {
        info!(
            "{} request: url={}, reply_field={}, message_len={}",
            self.name,
            self.url,
            self.shape.field(),
            text.len()
        );

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&ChatRequest { message: text })
            .send()
            .await?;

        let status = response.status();
        debug!("{} response status: {}", self.name, status);
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        self.shape.extract(&body)
    }
}

fn api_chat_url(base_url: &str) -> String {
    format!("{}/api/chat", base_url.trim_end_matches('/'))
}

#[async_trait]
impl Responder for RemoteResponder {
    fn name(&self) -> &str {
        &self.name
    }

    async fn respond(&self, text: &ValidText) -> String {
        match self.request(text.as_str()).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("{} request failed: {}", self.name, e);
                self.failure.render(&e)
            }
        }
    }
}
