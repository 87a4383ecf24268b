//! # Dispatcher
//!
//! Owns one responder per [`ResponderKind`] and remembers which one the
//! send action is currently bound to. Binding is plain state on the
//! dispatcher; there is no global selector.
//!
//! Rebinding only changes what the *next* send uses. A reply already in
//! flight holds its own `Arc` to the responder that started it.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;

use crate::ResponderKind;
use crate::core::config::ResolvedConfig;
use crate::reply::{
    CannedResponder, EchoResponder, KeywordResponder, RemoteResponder, Responder,
};

pub struct Dispatcher {
    responders: HashMap<ResponderKind, Arc<dyn Responder>>,
    active: ResponderKind,
}

impl Dispatcher {
    /// An empty dispatcher bound to `active`. Responders are added with
    /// [`Dispatcher::register`].
    pub fn new(active: ResponderKind) -> Self {
        Self {
            responders: HashMap::new(),
            active,
        }
    }

    /// Builds every responder from the resolved config.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let timeout = config.request_timeout;
        let mut dispatcher = Self::new(config.responder);
        dispatcher.register(
            ResponderKind::Api,
            Arc::new(RemoteResponder::api(&config.api_base_url, timeout)),
        );
        dispatcher.register(
            ResponderKind::ApiVerbose,
            Arc::new(RemoteResponder::api_verbose(&config.api_base_url, timeout)),
        );
        dispatcher.register(
            ResponderKind::ChatServer,
            Arc::new(RemoteResponder::chat_server(&config.chat_server_url, timeout)),
        );
        dispatcher.register(
            ResponderKind::Echo,
            Arc::new(EchoResponder::new(config.echo_delay)),
        );
        dispatcher.register(
            ResponderKind::Canned,
            Arc::new(CannedResponder::new(config.canned_delay)),
        );
        dispatcher.register(
            ResponderKind::Keyword,
            Arc::new(KeywordResponder::new(config.keyword_delay)),
        );
        info!("Dispatcher ready, bound to {}", dispatcher.active);
        dispatcher
    }

    pub fn register(&mut self, kind: ResponderKind, responder: Arc<dyn Responder>) {
        self.responders.insert(kind, responder);
    }

    /// Binds the send action to `kind`. Binding the already active kind is a no-op.
    pub fn bind(&mut self, kind: ResponderKind) {
        if self.active != kind {
            info!("Switched responder: {} -> {}", self.active, kind);
            self.active = kind;
        }
    }

    /// Binds by name; unknown names bind `keyword`.
    pub fn bind_name(&mut self, name: &str) -> ResponderKind {
        let kind = ResponderKind::from_name(name);
        self.bind(kind);
        kind
    }

    pub fn active(&self) -> ResponderKind {
        self.active
    }

    /// The responder the next send will use, if one is registered for the active kind.
    pub fn responder(&self) -> Option<Arc<dyn Responder>> {
        self.responders.get(&self.active).cloned()
    }
}
