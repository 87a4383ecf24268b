//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::ResponderKind;
use crate::core::dispatch::Dispatcher;
use crate::core::state::App;
use crate::core::validate::ValidText;
use crate::reply::Responder;

/// Answers immediately with `stub:<name>:<text>`.
pub struct StubResponder {
    name: &'static str,
}

impl StubResponder {
    pub fn new(kind: ResponderKind) -> Self {
        Self { name: kind.name() }
    }
}

#[async_trait]
impl Responder for StubResponder {
    fn name(&self) -> &str {
        self.name
    }

    async fn respond(&self, text: &ValidText) -> String {
        format!("stub:{}:{}", self.name, text)
    }
}

/// Creates a test App bound to `keyword` with a stub for every responder kind.
pub fn test_app() -> App {
    test_app_with(&ResponderKind::ALL)
}

/// Creates a test App bound to `keyword` with stubs only for `kinds`.
pub fn test_app_with(kinds: &[ResponderKind]) -> App {
    let mut dispatcher = Dispatcher::new(ResponderKind::Keyword);
    for kind in kinds {
        dispatcher.register(*kind, Arc::new(StubResponder::new(*kind)));
    }
    App::new(dispatcher)
}
