// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription requests

use super::listener::{Block, Target};
use super::pattern::Pattern;
use super::registry::{ListenerId, Registry};
use crate::error::{BusError, ListenerResult};
use crate::value::Payload;
use std::sync::Arc;

enum Selector {
    Pattern(Pattern),
    Object(Arc<dyn Target>),
}

/// A request to register a listener, validated when handed to the bus
///
/// ```
/// use herald_core::{Bus, Subscription};
///
/// let bus = Bus::new();
/// bus.subscribe(Subscription::to("user_created").block(|_payload| Ok(())))
///     .unwrap();
/// ```
pub struct Subscription {
    selector: Selector,
    target: Option<Arc<dyn Target>>,
    method: Option<String>,
    block: Option<Block>,
}

impl Subscription {
    /// Subscribe to events matching `pattern`
    pub fn to(pattern: impl Into<Pattern>) -> Self {
        Self::with_selector(Selector::Pattern(pattern.into()))
    }

    /// Subscribe a bare object: every event is offered to the same-named method
    pub fn object(target: Arc<dyn Target>) -> Self {
        Self::with_selector(Selector::Object(target))
    }

    fn with_selector(selector: Selector) -> Self {
        Self {
            selector,
            target: None,
            method: None,
            block: None,
        }
    }

    /// Deliver to `target` (requires [`method`](Self::method))
    pub fn target(mut self, target: Arc<dyn Target>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Deliver to a closure
    pub fn block<F>(mut self, block: F) -> Self
    where
        F: Fn(&Payload) -> ListenerResult + Send + Sync + 'static,
    {
        self.block = Some(Arc::new(block));
        self
    }

    /// Deliver to an already shared closure
    pub fn shared_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    pub(crate) fn register(self, registry: &Registry) -> Result<ListenerId, BusError> {
        match self.selector {
            Selector::Pattern(pattern) => registry.add(pattern, self.target, self.method, self.block),
            Selector::Object(target) => {
                if self.target.is_some() || self.method.is_some() || self.block.is_some() {
                    return Err(BusError::InvalidArgument(
                        "a bare listener cannot take a method name or a block".to_string(),
                    ));
                }
                Ok(registry.add_object(target))
            }
        }
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
