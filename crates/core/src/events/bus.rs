// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus facade

use super::listener::{Identity, Target};
use super::pattern::Pattern;
use super::registry::{ListenerId, Registry};
use super::subscription::Subscription;
use crate::config::BusConfig;
use crate::error::{BusError, ListenerResult};
use crate::name::Name;
use crate::queue::{EventWorker, TaskQueue};
use crate::value::{Payload, Value};
use std::fmt;
use std::sync::Arc;

/// Public entry point for publishing and subscribing
///
/// Every successful call returns the bus again so calls can be chained:
///
/// ```
/// use herald_core::{Bus, Payload, Subscription};
///
/// let bus = Bus::new();
/// bus.subscribe(Subscription::to("saved").block(|_| Ok(())))?
///     .publish("saved", Payload::new())?
///     .publish("deleted", Payload::new())?;
/// # Ok::<(), herald_core::BusError>(())
/// ```
#[derive(Clone)]
pub struct Bus {
    registry: Registry,
    queue: Option<Arc<dyn TaskQueue>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::with_registry(Registry::new())
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self::with_registry(Registry::with_config(config))
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            queue: None,
        }
    }

    /// Attach the queue used by [`bg_publish`](Self::bg_publish)
    pub fn with_queue(mut self, queue: Arc<dyn TaskQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Worker that replays this bus's background jobs
    pub fn worker(&self) -> EventWorker {
        EventWorker::new(self.registry.clone())
    }

    /// Announce an event to every matching listener.
    ///
    /// `event_name` must be text or an atom; anything else is rejected
    /// before any listener runs.
    pub fn publish(&self, event_name: impl Into<Value>, payload: Payload) -> Result<&Self, BusError> {
        let event_name = Name::try_from(event_name.into())?;
        self.registry.announce(&event_name, payload)?;
        Ok(self)
    }

    /// Register a listener
    pub fn subscribe(&self, subscription: Subscription) -> Result<&Self, BusError> {
        subscription.register(&self.registry)?;
        Ok(self)
    }

    /// Register one method listener on `target` per `(pattern, method)` pair,
    /// in order
    ///
    /// ```
    /// use herald_core::{Bus, Methods, Pattern};
    /// use std::sync::Arc;
    ///
    /// let audit = Arc::new(
    ///     Methods::new(())
    ///         .on("created", |_, _| Ok(()))
    ///         .on("changed", |_, _| Ok(())),
    /// );
    /// let bus = Bus::new();
    /// bus.register(
    ///     audit,
    ///     [
    ///         (Pattern::from("user_created"), "created"),
    ///         (Pattern::regex("^user_(renamed|moved)$")?, "changed"),
    ///     ],
    /// )?;
    /// assert_eq!(bus.registry().len(), 2);
    /// # Ok::<(), herald_core::BusError>(())
    /// ```
    pub fn register<P, M>(
        &self,
        target: Arc<dyn Target>,
        events: impl IntoIterator<Item = (P, M)>,
    ) -> Result<&Self, BusError>
    where
        P: Into<Pattern>,
        M: Into<String>,
    {
        let events = events
            .into_iter()
            .map(|(pattern, method)| (pattern.into(), method.into()))
            .collect();
        self.registry.add_methods(target, events)?;
        Ok(self)
    }

    /// Register a listener, returning its id for [`unsubscribe`](Self::unsubscribe)
    pub fn subscribe_with_id(&self, subscription: Subscription) -> Result<ListenerId, BusError> {
        subscription.register(&self.registry)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> &Self {
        self.registry.remove(id);
        self
    }

    /// Install the error handler, replacing any previous one.
    ///
    /// Only one handler is active at a time.
    pub fn on_error<F>(&self, handler: F) -> &Self
    where
        F: Fn(&Identity, &Payload) -> ListenerResult + Send + Sync + 'static,
    {
        self.registry.on_error(Arc::new(handler));
        self
    }

    /// Delete all subscriptions
    pub fn clear(&self) -> &Self {
        self.registry.clear();
        self
    }

    /// Run `work` with a method listener subscribed, removing it afterwards.
    ///
    /// The listener is removed on every exit path, including a panic
    /// unwinding out of `work`.
    pub fn with_temporary_subscriber<R>(
        &self,
        pattern: impl Into<Pattern>,
        target: Arc<dyn Target>,
        method: impl Into<String>,
        work: impl FnOnce() -> R,
    ) -> Result<R, BusError> {
        let id = self.subscribe_with_id(Subscription::to(pattern).target(target).method(method))?;
        let _guard = TemporarySubscription {
            registry: &self.registry,
            id,
        };
        Ok(work())
    }

    /// Hand the event to the attached task queue for later delivery.
    ///
    /// The job stores the event name and payload as JSON; see
    /// [`EventWorker`] for how values are coerced on the way back.
    pub fn bg_publish(&self, event_name: impl Into<Value>, payload: Payload) -> Result<&Self, BusError> {
        let event_name = Name::try_from(event_name.into())?;
        let queue = self.queue.as_ref().ok_or(BusError::NoQueue)?;

        let job = EventWorker::job(&event_name, &payload, &self.registry.config().worker.queue)?;
        tracing::debug!(job = %job.id, event = %event_name, queue = %job.queue, "submitting event job");
        queue.submit(job)?;
        Ok(self)
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("listeners", &self.registry.len())
            .field("error_handler", &self.registry.has_error_handler())
            .field("queue", &self.queue.is_some())
            .finish()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes a registration when dropped
struct TemporarySubscription<'a> {
    registry: &'a Registry,
    id: ListenerId,
}

impl Drop for TemporarySubscription<'_> {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
