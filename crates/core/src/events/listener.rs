// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listeners and the targets they deliver to

use super::pattern::Pattern;
use crate::config::NameMatching;
use crate::error::{ListenerError, ListenerResult};
use crate::name::Name;
use crate::value::{Payload, Value, EVENT_NAME_KEY};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An object that handles events through named methods
///
/// `responds_to` is the capability check used by bare-object subscriptions:
/// events whose name the target does not respond to are skipped.
pub trait Target: Send + Sync {
    /// Whether a method of this name exists
    fn responds_to(&self, method: &str) -> bool;

    /// Call the named method with the delivered payload
    fn invoke(&self, method: &str, payload: &Payload) -> ListenerResult;
}

/// A closure listener
pub type Block = Arc<dyn Fn(&Payload) -> ListenerResult + Send + Sync>;

type MethodFn<S> = Box<dyn Fn(&S, &Payload) -> ListenerResult + Send + Sync>;

/// A [`Target`] built from a table of named handler functions over some state
///
/// ```
/// use herald_core::{Methods, Target, payload};
/// use std::sync::Mutex;
///
/// let audit = Methods::new(Mutex::new(Vec::new()))
///     .on("user_created", |log, p| {
///         log.lock().unwrap().push(p.clone());
///         Ok(())
///     });
/// assert!(audit.responds_to("user_created"));
/// assert!(!audit.responds_to("user_deleted"));
/// ```
pub struct Methods<S> {
    state: S,
    table: HashMap<String, MethodFn<S>>,
}

impl<S> Methods<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            table: HashMap::new(),
        }
    }

    /// Register a handler; a later registration of the same name replaces it
    pub fn on<F>(mut self, method: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&S, &Payload) -> ListenerResult + Send + Sync + 'static,
    {
        self.table.insert(method.into(), Box::new(handler));
        self
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Registered method names, in no particular order
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}

impl<S: Send + Sync> Target for Methods<S> {
    fn responds_to(&self, method: &str) -> bool {
        self.table.contains_key(method)
    }

    fn invoke(&self, method: &str, payload: &Payload) -> ListenerResult {
        match self.table.get(method) {
            Some(handler) => handler(&self.state, payload),
            None => Err(ListenerError::NoSuchMethod {
                method: method.to_string(),
            }),
        }
    }
}

impl<S> fmt::Debug for Methods<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.methods().collect();
        names.sort_unstable();
        f.debug_struct("Methods").field("methods", &names).finish()
    }
}

/// The entity behind a listener, reported to error handlers
#[derive(Clone)]
pub enum Identity {
    Target(Arc<dyn Target>),
    Block(Block),
}

impl Identity {
    /// Whether this identity refers to the same allocation as `other`
    pub fn is<T: ?Sized>(&self, other: &Arc<T>) -> bool {
        std::ptr::eq(self.addr(), Arc::as_ptr(other).cast::<()>())
    }

    pub fn as_target(&self) -> Option<&Arc<dyn Target>> {
        match self {
            Self::Target(t) => Some(t),
            Self::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(b) => Some(b),
            Self::Target(_) => None,
        }
    }

    fn addr(&self) -> *const () {
        match self {
            Self::Target(t) => Arc::as_ptr(t).cast::<()>(),
            Self::Block(b) => Arc::as_ptr(b).cast::<()>(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(_) => write!(f, "Target({:p})", self.addr()),
            Self::Block(_) => write!(f, "Block({:p})", self.addr()),
        }
    }
}

/// Delivers to a method on a shared target
#[derive(Clone)]
pub struct MethodListener {
    pattern: Pattern,
    target: Arc<dyn Target>,
    /// `None` derives the method from the event name
    method: Option<String>,
}

/// Delivers to a closure
#[derive(Clone)]
pub struct BlockListener {
    pattern: Pattern,
    block: Block,
}

/// A registered (pattern, target) pair
#[derive(Clone)]
pub enum Listener {
    Method(MethodListener),
    Block(BlockListener),
}

impl Listener {
    /// Listener calling `method` on `target` for every matching event
    pub fn method(pattern: Pattern, target: Arc<dyn Target>, method: impl Into<String>) -> Self {
        Self::Method(MethodListener {
            pattern,
            target,
            method: Some(method.into()),
        })
    }

    /// Listener calling the target method named after each event, if it exists
    pub fn object(target: Arc<dyn Target>) -> Self {
        Self::Method(MethodListener {
            pattern: Pattern::Any,
            target,
            method: None,
        })
    }

    pub fn block(pattern: Pattern, block: Block) -> Self {
        Self::Block(BlockListener { pattern, block })
    }

    pub fn pattern(&self) -> &Pattern {
        match self {
            Self::Method(m) => &m.pattern,
            Self::Block(b) => &b.pattern,
        }
    }

    pub fn identity(&self) -> Identity {
        match self {
            Self::Method(m) => Identity::Target(Arc::clone(&m.target)),
            Self::Block(b) => Identity::Block(Arc::clone(&b.block)),
        }
    }

    /// Deliver the event if the pattern matches. Failures are returned, not caught.
    pub fn attempt(&self, event_name: &Name, payload: &Payload, mode: NameMatching) -> ListenerResult {
        if !self.pattern().matches_with(event_name, mode) {
            return Ok(());
        }

        match self {
            Self::Method(MethodListener {
                target,
                method: Some(method),
                ..
            }) => {
                if !target.responds_to(method) {
                    return Err(ListenerError::NoSuchMethod {
                        method: method.clone(),
                    });
                }
                target.invoke(method, payload)
            }
            Self::Method(MethodListener {
                target,
                method: None,
                ..
            }) => {
                let method = payload
                    .get(&Name::atom(EVENT_NAME_KEY))
                    .and_then(Value::as_str)
                    .unwrap_or_else(|| event_name.as_str());
                if target.responds_to(method) {
                    target.invoke(method, payload)
                } else {
                    tracing::trace!(method, "target does not respond; skipping");
                    Ok(())
                }
            }
            Self::Block(b) => (b.block)(payload),
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method(m) => f
                .debug_struct("MethodListener")
                .field("pattern", &m.pattern)
                .field("method", &m.method)
                .finish(),
            Self::Block(b) => f
                .debug_struct("BlockListener")
                .field("pattern", &b.pattern)
                .finish(),
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
