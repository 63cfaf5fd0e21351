// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener registry and synchronous dispatch

use super::listener::{Block, Identity, Listener, Target};
use super::pattern::Pattern;
use crate::config::{BusConfig, HandlerFailure};
use crate::error::{BusError, ListenerError, ListenerResult};
use crate::name::Name;
use crate::value::{Payload, Value, ERROR_KEY, EVENT_NAME_KEY};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Receives `(errant listener identity, payload with :error)` on listener failure
pub type ErrorHandler = Arc<dyn Fn(&Identity, &Payload) -> ListenerResult + Send + Sync>;

/// Handle identifying one registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Entry {
    id: ListenerId,
    listener: Arc<Listener>,
}

/// Ordered store of listeners plus the optional error handler
///
/// Clones share state. Dispatch works on a snapshot of the listener list,
/// so listeners may subscribe, unsubscribe or publish while being called.
pub struct Registry {
    listeners: Arc<RwLock<Vec<Entry>>>,
    error_handler: Arc<RwLock<Option<ErrorHandler>>>,
    next_id: Arc<AtomicU64>,
    config: Arc<BusConfig>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self {
            listeners: Arc::new(RwLock::new(Vec::new())),
            error_handler: Arc::new(RwLock::new(None)),
            next_id: Arc::new(AtomicU64::new(1)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Append a listener calling `method` on `target`
    pub fn add_method(
        &self,
        pattern: Pattern,
        target: Arc<dyn Target>,
        method: impl Into<String>,
    ) -> ListenerId {
        self.push(Listener::method(pattern, target, method))
    }

    /// Append a closure listener
    pub fn add_block(&self, pattern: Pattern, block: Block) -> ListenerId {
        self.push(Listener::block(pattern, block))
    }

    /// Append a listener dispatching every event to the same-named target method
    pub fn add_object(&self, target: Arc<dyn Target>) -> ListenerId {
        self.push(Listener::object(target))
    }

    /// Append one method listener on `target` per `(pattern, method)` pair.
    ///
    /// Every method name is checked first; on error nothing is added.
    pub fn add_methods(
        &self,
        target: Arc<dyn Target>,
        events: Vec<(Pattern, String)>,
    ) -> Result<Vec<ListenerId>, BusError> {
        if events.iter().any(|(_, method)| method.is_empty()) {
            return Err(invalid("must supply a method name"));
        }
        Ok(events
            .into_iter()
            .map(|(pattern, method)| self.add_method(pattern, Arc::clone(&target), method))
            .collect())
    }

    /// Append either a method or a closure listener.
    ///
    /// Exactly one of `target` (with `method`) or `block` must be given.
    pub fn add(
        &self,
        pattern: Pattern,
        target: Option<Arc<dyn Target>>,
        method: Option<String>,
        block: Option<Block>,
    ) -> Result<ListenerId, BusError> {
        match (target, method, block) {
            (Some(_), _, Some(_)) => Err(invalid("cannot give both a listener and a block")),
            (Some(_), None, None) => Err(invalid("must supply a method name")),
            (Some(target), Some(method), None) => Ok(self.add_method(pattern, target, method)),
            (None, Some(_), Some(_)) => Err(invalid("a method name requires a listener")),
            (None, _, Some(block)) => Ok(self.add_block(pattern, block)),
            (None, _, None) => Err(invalid("must provide a listener or a block")),
        }
    }

    fn push(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(?id, pattern = %listener.pattern(), "listener added");

        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        listeners.push(Entry {
            id,
            listener: Arc::new(listener),
        });
        id
    }

    /// Remove one registration. Returns false if it was already gone.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|entry| entry.id != id);
        let removed = listeners.len() != before;
        tracing::debug!(?id, removed, "listener removed");
        removed
    }

    /// Most recently added registration still present
    pub fn last(&self) -> Option<ListenerId> {
        self.listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .map(|entry| entry.id)
    }

    /// Delete all registrations. The error handler is kept.
    pub fn clear(&self) {
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        tracing::debug!(count = listeners.len(), "listeners cleared");
        listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Install the error handler, replacing any previous one
    pub fn on_error(&self, handler: ErrorHandler) {
        let mut slot = self.error_handler.write().unwrap_or_else(|e| e.into_inner());
        if slot.is_some() {
            tracing::debug!("replacing error handler");
        }
        *slot = Some(handler);
    }

    pub fn has_error_handler(&self) -> bool {
        self.error_handler
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Deliver an event to every matching listener, in registration order.
    ///
    /// Listener failures never reach the caller. The only error returned is
    /// an error handler failure under [`HandlerFailure::Propagate`].
    pub fn announce(&self, event_name: &Name, payload: Payload) -> Result<(), BusError> {
        let mut full_payload = payload;
        full_payload.insert(Name::atom(EVENT_NAME_KEY), Value::from(event_name));

        let snapshot: Vec<Arc<Listener>> = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|entry| Arc::clone(&entry.listener))
            .collect();

        let span = tracing::debug_span!("bus.announce", event = %event_name, listeners = snapshot.len());
        let _guard = span.enter();

        for listener in snapshot {
            if let Err(error) = self.deliver(&listener, event_name, &full_payload) {
                self.report(&listener, &full_payload, error)?;
            }
        }

        Ok(())
    }

    fn deliver(&self, listener: &Listener, event_name: &Name, payload: &Payload) -> ListenerResult {
        let mode = self.config.name_matching;
        if !self.config.catch_panics {
            return listener.attempt(event_name, payload, mode);
        }

        panic::catch_unwind(AssertUnwindSafe(|| listener.attempt(event_name, payload, mode)))
            .unwrap_or_else(|panic_err| {
                let message = if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
                    (*msg).to_string()
                } else if let Some(msg) = panic_err.downcast_ref::<String>() {
                    msg.clone()
                } else {
                    "unknown panic".to_string()
                };
                Err(ListenerError::Panicked(message))
            })
    }

    fn report(&self, listener: &Listener, payload: &Payload, error: ListenerError) -> Result<(), BusError> {
        let identity = listener.identity();

        // Clone the handler out so it can re-enter the registry
        let handler = self
            .error_handler
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let Some(handler) = handler else {
            tracing::debug!(listener = ?identity, %error, "listener failed; no error handler");
            return Ok(());
        };

        let mut errored = payload.clone();
        errored.insert(Name::atom(ERROR_KEY), Value::from(error));

        match handler(&identity, &errored) {
            Ok(()) => Ok(()),
            Err(handler_err) => match self.config.handler_failure {
                HandlerFailure::Propagate => Err(BusError::Handler(handler_err)),
                HandlerFailure::Log => {
                    tracing::error!(listener = ?identity, error = %handler_err, "error handler failed");
                    Ok(())
                }
            },
        }
    }
}

fn invalid(message: &str) -> BusError {
    BusError::InvalidArgument(message.to_string())
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            error_handler: Arc::clone(&self.error_handler),
            next_id: Arc::clone(&self.next_id),
            config: Arc::clone(&self.config),
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
