//! Handler registry: the service locator resolving lookup keys to handler
//! instances.
//!
//! Keys follow `prefix + lowercase(controller) + postfix`, derived by the
//! resolver. A missing binding is a configuration fault of the operator,
//! surfaced as a 500, never as a user-facing 404.

use std::collections::HashMap;
use std::sync::Arc;

use switchboard_core::DispatchError;

use crate::handler::Handler;

/// Maps lookup keys to shared handler instances.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler under a lookup key. Replaces any existing binding.
    pub fn register(&mut self, key: impl Into<String>, handler: impl Handler + 'static) {
        self.handlers.insert(key.into(), Arc::new(handler));
    }

    /// Bind a handler (builder pattern).
    pub fn with(mut self, key: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.register(key, handler);
        self
    }

    /// Resolve a lookup key to its handler.
    pub fn lookup(&self, key: &str) -> Result<Arc<dyn Handler>, DispatchError> {
        self.handlers
            .get(key)
            .cloned()
            .ok_or_else(|| DispatchError::Lookup {
                key: key.to_string(),
            })
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &self.handlers.len())
            .finish()
    }
}
