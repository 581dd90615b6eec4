//! Ordered pattern-to-handler bindings.
//!
//! The router is filled once at startup and only read afterwards, so it is
//! shared between concurrent dispatches without locking. Bindings are
//! checked in registration order and the first full match wins.

use super::{Command, CommandArgs, CommandPattern};
use tracing::debug;

/// A single pattern binding.
struct Route {
    pattern: CommandPattern,
    handler: Box<dyn Command>,
}

/// Router matching command text against registered patterns.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding. Duplicates are not detected; an identical pattern
    /// registered later is simply shadowed by the earlier one.
    pub fn register(&mut self, pattern: CommandPattern, handler: Box<dyn Command>) {
        debug!(pattern = %pattern.as_str(), command = handler.name(), "Registered route");
        self.routes.push(Route { pattern, handler });
    }

    /// Find the first binding matching the whole `text`.
    ///
    /// Returns `None` for text that is not a known command.
    pub fn resolve(&self, text: &str) -> Option<(&dyn Command, CommandArgs)> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .matches(text)
                .map(|args| (route.handler.as_ref(), args))
        })
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
