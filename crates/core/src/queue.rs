// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background job contract
//!
//! The bus never runs deferred work itself. It submits a [`Job`] (named
//! worker plus JSON arguments) to a [`TaskQueue`], and whatever runtime
//! drains that queue hands the job to an [`EventWorker`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(any(test, feature = "test-support"))]
mod fake;
mod worker;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTaskQueue;
pub use worker::{EventWorker, WorkerError, EVENT_WORKER};

/// Errors that can occur when submitting jobs
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue is closed")]
    Closed,
    #[error("job rejected: {0}")]
    Rejected(String),
    #[error("job serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A unit of deferred work with serializable arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub queue: String,
    pub worker: String,
    pub args: Vec<serde_json::Value>,
}

impl Job {
    /// Create a job with a fresh id
    pub fn new(
        queue: impl Into<String>,
        worker: impl Into<String>,
        args: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            queue: queue.into(),
            worker: worker.into(),
            args,
        }
    }

    /// Wire form, as an external queue would store it
    pub fn encode(&self) -> Result<String, QueueError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> Result<Self, QueueError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Accepts jobs for asynchronous execution
///
/// Submission is fire-and-forget: retries, persistence and concurrency are
/// the queue runtime's concern.
pub trait TaskQueue: Send + Sync {
    fn submit(&self, job: Job) -> Result<(), QueueError>;
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
