//! Two-phase navigation notifications
//!
//! Listeners subscribe to `before-navigate` (cleanup while the outgoing page
//! is still in the document) or `after-navigate`. Delivery follows
//! registration order, and a failing or panicking listener never prevents the
//! next listener from running nor aborts the navigation.

use super::page::PageKey;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Payload of both navigation notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEvent {
    pub from: Option<PageKey>,
    pub to: PageKey,
}

/// Which notification a listener subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationPhase {
    Before,
    After,
}

impl NavigationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationPhase::Before => "before-navigate",
            NavigationPhase::After => "after-navigate",
        }
    }
}

/// Navigation listener callback
pub type Listener = Box<dyn FnMut(&NavigationEvent) -> anyhow::Result<()>>;

/// Result of delivering one notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: usize,
}

/// Listener registry for both phases
#[derive(Default)]
pub struct EventBus {
    before: Vec<Listener>,
    after: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener to one phase
    pub fn subscribe<F>(&mut self, phase: NavigationPhase, listener: F)
    where
        F: FnMut(&NavigationEvent) -> anyhow::Result<()> + 'static,
    {
        self.listeners_mut(phase).push(Box::new(listener));
    }

    pub fn listener_count(&self, phase: NavigationPhase) -> usize {
        match phase {
            NavigationPhase::Before => self.before.len(),
            NavigationPhase::After => self.after.len(),
        }
    }

    /// Deliver `event` to every listener of `phase`
    pub fn emit(&mut self, phase: NavigationPhase, event: &NavigationEvent) -> Delivery {
        let mut delivery = Delivery::default();

        for (index, listener) in self.listeners_mut(phase).iter_mut().enumerate() {
            delivery.delivered += 1;
            match catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    delivery.failed += 1;
                    tracing::error!(
                        "{} listener #{} failed for '{}': {:#}",
                        phase.as_str(),
                        index,
                        event.to,
                        e
                    );
                }
                Err(_) => {
                    delivery.failed += 1;
                    tracing::error!(
                        "{} listener #{} panicked for '{}'",
                        phase.as_str(),
                        index,
                        event.to
                    );
                }
            }
        }

        delivery
    }

    fn listeners_mut(&mut self, phase: NavigationPhase) -> &mut Vec<Listener> {
        match phase {
            NavigationPhase::Before => &mut self.before,
            NavigationPhase::After => &mut self.after,
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}
