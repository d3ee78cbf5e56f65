//! Topic-based broadcast bus for platform-level signals.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// Broadcast whenever a present or dismiss transition starts.
///
/// Open contextual-action UI elsewhere in the system subscribes to this
/// topic to dismiss itself before the surface changes underneath it.
pub const CLOSE_CONTEXT_ACTIONS: &str = "navshell.close-context-actions";

type Handler = Box<dyn Fn(&Value) + Send>;

#[derive(Default)]
pub struct SignalBus {
    handlers: HashMap<String, Vec<Handler>>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, topic: impl Into<String>, handler: F)
    where
        F: Fn(&Value) + Send + 'static,
    {
        self.handlers
            .entry(topic.into())
            .or_default()
            .push(Box::new(handler));
    }

    pub fn publish<T: Serialize>(&self, topic: &str, payload: T) {
        let value = serde_json::to_value(payload).unwrap_or(Value::Null);
        if let Some(handlers) = self.handlers.get(topic) {
            for handler in handlers {
                handler(&value);
            }
        }
    }
}
