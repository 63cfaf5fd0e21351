// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! herald-core: in-process publish/subscribe event bus
//!
//! This crate provides:
//! - Pattern subscriptions (exact text, exact atom, regex) with ordered,
//!   synchronous fan-out on publish
//! - Per-listener failure isolation with a single replaceable error handler
//! - Temporary subscriptions scoped to a closure
//! - Background publishing through a pluggable task queue

pub mod config;
pub mod error;
pub mod events;
pub mod name;
pub mod queue;
pub mod value;

pub use config::{BusConfig, ConfigError, HandlerFailure, NameMatching, WorkerConfig};
pub use error::{BusError, ListenerError, ListenerResult};
pub use events::{
    Block, Bus, ErrorHandler, Identity, Listener, ListenerId, Methods, Pattern, Registry,
    Subscription, Target,
};
pub use name::{Atom, EventName, Name};
pub use queue::{EventWorker, Job, QueueError, TaskQueue, WorkerError, EVENT_WORKER};
pub use value::{Payload, Value, ERROR_KEY, EVENT_NAME_KEY};

#[cfg(any(test, feature = "test-support"))]
pub use queue::FakeTaskQueue;
