mod local;
mod remote;

pub use local::{
    CANNED_REPLIES, CannedResponder, DEFAULT_CANNED_DELAY, DEFAULT_ECHO_DELAY,
    DEFAULT_KEYWORD_DELAY, EchoResponder, KeywordResponder,
};
pub use remote::{API_APOLOGY, CHAT_SERVER_APOLOGY, FailureReply, RemoteResponder, ReplyShape};
