// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake task queue for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{EventWorker, Job, QueueError, TaskQueue, WorkerError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Records submitted jobs instead of running them
///
/// Jobs are stored in wire form and decoded on the way out, as a real
/// external queue would.
#[derive(Clone, Default)]
pub struct FakeTaskQueue {
    jobs: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl FakeTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject all further submissions with [`QueueError::Closed`]
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// All pending jobs, oldest first
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter_map(|raw| Job::decode(raw).ok())
            .collect()
    }

    /// Perform every pending job on `worker`, emptying the queue
    pub fn run_all(&self, worker: &EventWorker) -> Vec<Result<(), WorkerError>> {
        let pending: Vec<String> = std::mem::take(&mut *self.jobs.lock().unwrap_or_else(|e| e.into_inner()));
        pending
            .iter()
            .filter_map(|raw| Job::decode(raw).ok())
            .map(|job| worker.perform(&job))
            .collect()
    }
}

impl TaskQueue for FakeTaskQueue {
    fn submit(&self, job: Job) -> Result<(), QueueError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(QueueError::Closed);
        }
        let raw = job.encode()?;
        self.jobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(raw);
        Ok(())
    }
}
