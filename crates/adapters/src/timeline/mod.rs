// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timeline refresh sinks.
//!
//! A workspace's build history is cached outside the orchestrator. After a
//! build settles successfully the cache for that workspace must be
//! invalidated; a sink carries that signal to whoever owns the cache.

mod channel;

pub use channel::ChannelTimelineSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTimelineSink;

use async_trait::async_trait;
use hatch_core::WorkspaceId;
use thiserror::Error;

/// Errors from timeline operations
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("timeline receiver closed")]
    Closed,
}

/// Adapter that invalidates a workspace's cached build timeline
#[async_trait]
pub trait TimelineSink: Clone + Send + Sync + 'static {
    async fn refresh(&self, workspace_id: &WorkspaceId) -> Result<(), TimelineError>;
}
