//! Triggers react to events before action properties are updated

use super::{AsAny, HookContext};
use std::fmt;

/// A component run at the start of every sub-step
pub trait Trigger: AsAny + fmt::Debug {
    /// Called before any action updates its properties
    fn pre_update_properties(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
}

/// Event detection callback
pub type EventDetector<E> = Box<dyn FnMut(&HookContext<'_>) -> Option<E>>;

/// Event handler callback
pub type EventHandler<E> = Box<dyn FnMut(&E)>;

/// Fires an event to its subscribers whenever the detector reports one
pub struct EventTrigger<E> {
    detector: EventDetector<E>,
    handlers: Vec<EventHandler<E>>,
    /// Total events fired
    pub fire_count: u32,
}

impl<E: 'static> EventTrigger<E> {
    pub fn new<F>(detector: F) -> Self
    where
        F: FnMut(&HookContext<'_>) -> Option<E> + 'static,
    {
        Self {
            detector: Box::new(detector),
            handlers: Vec::new(),
            fire_count: 0,
        }
    }

    /// Register a handler
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&E) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Builder form of [`EventTrigger::subscribe`]
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&E) + 'static,
    {
        self.subscribe(handler);
        self
    }

    /// Notify every handler, in subscription order
    pub fn fire(&mut self, event: &E) {
        self.fire_count += 1;
        for handler in &mut self.handlers {
            handler(event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<E: 'static> Trigger for EventTrigger<E> {
    fn pre_update_properties(&mut self, _delta: f32, ctx: &mut HookContext<'_>) {
        if let Some(event) = (self.detector)(ctx) {
            self.fire(&event);
        }
    }
}

impl<E> fmt::Debug for EventTrigger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTrigger")
            .field("handlers", &self.handlers.len())
            .field("fire_count", &self.fire_count)
            .finish()
    }
}
