// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the worker runtime

use thiserror::Error;

/// Errors that can occur while running the worker
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("dispatcher task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
