// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel-backed task queue with a bounded worker pool

use crate::error::RuntimeError;
use herald_core::{EventWorker, Job, QueueError, TaskQueue, WorkerConfig, WorkerError};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinError, JoinHandle, JoinSet};

/// Counts of finished jobs, reported when the worker drains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub completed: usize,
    pub failed: usize,
    pub panicked: usize,
}

/// Submitting side of the local queue
///
/// Clones share the channel. The dispatcher stops once every clone is dropped.
#[derive(Clone)]
pub struct LocalQueue {
    tx: mpsc::UnboundedSender<Job>,
    name: Arc<str>,
}

/// Handle to the dispatcher task
pub struct WorkerHandle {
    join: JoinHandle<WorkerStats>,
}

impl LocalQueue {
    /// Spawn the dispatcher on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime. Use
    /// [`start_on`](Self::start_on) with an explicit handle there.
    pub fn start(worker: EventWorker, config: &WorkerConfig) -> (Self, WorkerHandle) {
        Self::start_on(&Handle::current(), worker, config)
    }

    /// Spawn the dispatcher on `runtime`
    pub fn start_on(
        runtime: &Handle,
        worker: EventWorker,
        config: &WorkerConfig,
    ) -> (Self, WorkerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let concurrency = config.concurrency.max(1);

        tracing::info!(queue = %config.queue, concurrency, "starting local worker");
        let join = runtime.spawn(dispatch(rx, worker, concurrency));

        let queue = Self {
            tx,
            name: Arc::from(config.queue.as_str()),
        };
        (queue, WorkerHandle { join })
    }
}

impl TaskQueue for LocalQueue {
    fn submit(&self, job: Job) -> Result<(), QueueError> {
        if job.queue != *self.name {
            return Err(QueueError::Rejected(format!(
                "job {} is for queue {}, this is {}",
                job.id, job.queue, self.name
            )));
        }
        self.tx.send(job).map_err(|_| QueueError::Closed)
    }
}

impl WorkerHandle {
    /// Wait for every submitted job to finish.
    ///
    /// Only returns after all [`LocalQueue`] clones (including the one held
    /// by the bus) have been dropped.
    pub async fn drain(self) -> Result<WorkerStats, RuntimeError> {
        Ok(self.join.await?)
    }

    /// Stop the dispatcher without waiting for pending jobs
    pub fn abort(&self) {
        self.join.abort();
    }
}

type Outcome = (String, Result<(), WorkerError>);

async fn dispatch(
    mut rx: mpsc::UnboundedReceiver<Job>,
    worker: EventWorker,
    concurrency: usize,
) -> WorkerStats {
    let permits = Arc::new(Semaphore::new(concurrency));
    let mut running: JoinSet<Outcome> = JoinSet::new();
    let mut stats = WorkerStats::default();

    while let Some(job) = rx.recv().await {
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };

        let worker = worker.clone();
        running.spawn_blocking(move || {
            let _permit = permit;
            let result = worker.perform(&job);
            (job.id, result)
        });

        while let Some(done) = running.try_join_next() {
            record(&mut stats, done);
        }
    }

    while let Some(done) = running.join_next().await {
        record(&mut stats, done);
    }

    tracing::info!(
        completed = stats.completed,
        failed = stats.failed,
        panicked = stats.panicked,
        "local worker drained"
    );
    stats
}

fn record(stats: &mut WorkerStats, done: Result<Outcome, JoinError>) {
    match done {
        Ok((id, Ok(()))) => {
            tracing::debug!(job = %id, "job completed");
            stats.completed += 1;
        }
        Ok((id, Err(error))) => {
            tracing::warn!(job = %id, %error, "job failed");
            stats.failed += 1;
        }
        Err(error) => {
            tracing::error!(%error, "job panicked");
            stats.panicked += 1;
        }
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
