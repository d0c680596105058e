//! The dispatch table: an explicit pattern→handler mapping.
//!
//! The table is plain data. Building it has no side effects; installing it
//! into a bus (and thereby making it routable) is a separate step.

use crate::bus::MessageBus;
use crate::error::DispatchError;
use crate::pattern::Pattern;
use crudbus_core::Request;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::warn;

pub type HandlerResult = Result<Value, DispatchError>;
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send>>;

/// An installed handler. Receives the bus it runs on so compound handlers
/// can dispatch further requests through the same table.
pub type Handler = Arc<dyn Fn(MessageBus, Request) -> HandlerFuture + Send + Sync>;

/// Wraps an async closure into a boxed [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(MessageBus, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |bus, req| Box::pin(f(bus, req)))
}

/// An explicit mapping from [`Pattern`] to [`Handler`].
#[derive(Default)]
pub struct DispatchTable {
    handlers: HashMap<Pattern, Handler>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler under a pattern, replacing any existing entry.
    /// Overrides are legal (hooks use them) but logged.
    pub fn insert(&mut self, pattern: Pattern, handler: Handler) {
        if self.handlers.insert(pattern.clone(), handler).is_some() {
            warn!(
                role = %pattern.role,
                model = ?pattern.model,
                cmd = %pattern.cmd,
                "handler overridden"
            );
        }
    }

    /// Routes a request key to a handler: the exact model entry wins, then
    /// the model-wildcard entry for the same role and cmd.
    pub fn lookup(&self, role: &str, model: Option<&str>, cmd: &str) -> Option<&Handler> {
        if let Some(model) = model {
            let exact = Pattern::exact(role, model, cmd);
            if let Some(h) = self.handlers.get(&exact) {
                return Some(h);
            }
        }
        self.handlers.get(&Pattern::wildcard(role, cmd))
    }

    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.handlers.contains_key(pattern)
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates over registered patterns, in no particular order.
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.handlers.keys()
    }
}
