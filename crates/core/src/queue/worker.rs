// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker that replays background-published events

use super::Job;
use crate::error::BusError;
use crate::events::Registry;
use crate::name::Name;
use crate::value::{payload_from_json, payload_to_json, Payload, EVENT_NAME_KEY};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Worker name stamped on background-publish jobs
pub const EVENT_WORKER: &str = "herald.event_worker";

/// Errors that can occur while performing a job
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("job {id} belongs to worker {worker}, not {EVENT_WORKER}")]
    WrongWorker { id: String, worker: String },
    #[error("malformed job {id}: {reason}")]
    Malformed { id: String, reason: String },
    #[error("announce failed: {0}")]
    Announce(#[from] BusError),
}

/// Announces queued events on a registry
///
/// Job arguments are `[event_name, payload]`. Both pass through JSON, so the
/// event name arrives as text, payload keys as text and atom values as text.
#[derive(Clone)]
pub struct EventWorker {
    registry: Registry,
}

impl EventWorker {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Build the job for a background publish.
    ///
    /// Fails with [`BusError::InvalidArgument`] when the payload cannot be
    /// carried as JSON without losing a value.
    pub fn job(event_name: &Name, payload: &Payload, queue: &str) -> Result<Job, BusError> {
        Ok(Job::new(
            queue,
            EVENT_WORKER,
            vec![
                JsonValue::String(event_name.as_str().to_string()),
                JsonValue::Object(payload_to_json(payload)?),
            ],
        ))
    }

    /// Extract the event name and payload carried by a job
    pub fn decode(job: &Job) -> Result<(Name, Payload), WorkerError> {
        if job.worker != EVENT_WORKER {
            return Err(WorkerError::WrongWorker {
                id: job.id.clone(),
                worker: job.worker.clone(),
            });
        }

        let malformed = |reason: &str| WorkerError::Malformed {
            id: job.id.clone(),
            reason: reason.to_string(),
        };

        let [name, payload] = job.args.as_slice() else {
            return Err(malformed("expected [event_name, payload]"));
        };
        let JsonValue::String(name) = name else {
            return Err(malformed("event name must be a string"));
        };
        let JsonValue::Object(payload) = payload else {
            return Err(malformed("payload must be an object"));
        };

        let mut payload = payload_from_json(payload.clone());
        // announce re-inserts the reserved key in atom form
        payload.shift_remove(&Name::text(EVENT_NAME_KEY));

        Ok((Name::text(name.clone()), payload))
    }

    /// Announce the job's event synchronously
    pub fn perform(&self, job: &Job) -> Result<(), WorkerError> {
        let (event_name, payload) = Self::decode(job)?;
        tracing::debug!(job = %job.id, event = %event_name, "performing event job");
        self.registry.announce(&event_name, payload)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
