// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the event bus

use crate::queue::QueueError;
use thiserror::Error;

/// Errors returned to callers of the bus
#[derive(Debug, Error)]
pub enum BusError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("error handler failed: {0}")]
    Handler(#[source] ListenerError),
    #[error("no task queue attached for background publish")]
    NoQueue,
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),
}

/// A failure raised by listener code (or by an error handler)
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("undefined method `{method}` for listener")]
    NoSuchMethod { method: String },
    #[error("listener panicked: {0}")]
    Panicked(String),
    #[error("{0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ListenerError {
    /// Failure carrying only a message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Failed(message.into().into())
    }

    /// Failure wrapping another error
    pub fn new(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Failed(Box::new(error))
    }
}

/// Result type for listener and error handler code
pub type ListenerResult = Result<(), ListenerError>;
