// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events system for loose coupling between components
//!
//! This module provides:
//! - `Bus` - Publish/subscribe facade with background publishing
//! - `Registry` - Ordered listener store with per-listener error isolation
//! - `Listener` / `Target` / `Methods` - What gets called on delivery
//! - `Pattern` - Matching of event names to subscriptions

mod bus;
mod listener;
mod pattern;
mod registry;
mod subscription;

pub use bus::Bus;
pub use listener::{Block, BlockListener, Identity, Listener, MethodListener, Methods, Target};
pub use pattern::Pattern;
pub use registry::{ErrorHandler, ListenerId, Registry};
pub use subscription::Subscription;
