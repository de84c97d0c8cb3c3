//! Resource handler registry for routing URIs to appropriate handlers.

use std::sync::Arc;

use super::traits::ResourceHandler;

/// Registry that routes URIs to the first handler that supports them.
#[derive(Default)]
pub struct ResourceRegistry {
    /// Handlers in registration order.
    handlers: Vec<Arc<dyn ResourceHandler>>,
}

impl ResourceRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler.
    ///
    /// # Arguments
    ///
    /// * `handler` - The handler implementation to register
    pub fn register(&mut self, handler: Arc<dyn ResourceHandler>) {
        self.handlers.push(handler);
    }

    /// Gets the handler for the given URI.
    ///
    /// # Returns
    ///
    /// The first registered handler that supports `uri`, or None if no handler
    /// recognizes it.
    pub fn handler_for(&self, uri: &str) -> Option<Arc<dyn ResourceHandler>> {
        self.handlers.iter().find(|handler| handler.supports(uri)).cloned()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<_> = self.handlers.iter().map(|handler| handler.kind()).collect();
        f.debug_struct("ResourceRegistry").field("handlers", &kinds).finish()
    }
}
