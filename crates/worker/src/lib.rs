// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! In-process runtime for background-published events
//!
//! [`LocalQueue`] implements the bus's task queue contract on top of a tokio
//! channel. A single dispatcher task pulls jobs and performs each one on the
//! blocking pool, with at most `worker.concurrency` jobs in flight.
//!
//! ```no_run
//! use std::sync::Arc;
//! use herald_core::{Bus, BusConfig, Payload};
//! use herald_worker::LocalQueue;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BusConfig::default();
//! let bus = Bus::with_config(config.clone());
//! let (queue, handle) = LocalQueue::start(bus.worker(), &config.worker);
//! let bus = bus.with_queue(Arc::new(queue));
//!
//! bus.bg_publish("report_ready", Payload::new())?;
//!
//! drop(bus);
//! let stats = handle.drain().await?;
//! assert_eq!(stats.completed, 1);
//! # Ok(())
//! # }
//! ```

mod error;
mod local;

pub use error::RuntimeError;
pub use local::{LocalQueue, WorkerHandle, WorkerStats};
