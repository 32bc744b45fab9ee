// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake timeline sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{TimelineError, TimelineSink};
use async_trait::async_trait;
use hatch_core::WorkspaceId;
use parking_lot::Mutex;
use std::sync::Arc;

struct FakeTimelineState {
    refreshes: Vec<WorkspaceId>,
    closed: bool,
}

/// Fake timeline sink that records refreshes
#[derive(Clone)]
pub struct FakeTimelineSink {
    inner: Arc<Mutex<FakeTimelineState>>,
}

impl Default for FakeTimelineSink {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeTimelineState {
                refreshes: Vec::new(),
                closed: false,
            })),
        }
    }
}

impl FakeTimelineSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded refreshes
    pub fn refreshes(&self) -> Vec<WorkspaceId> {
        self.inner.lock().refreshes.clone()
    }

    /// Make every later refresh fail as if the receiver were gone
    pub fn close(&self) {
        self.inner.lock().closed = true;
    }
}

#[async_trait]
impl TimelineSink for FakeTimelineSink {
    async fn refresh(&self, workspace_id: &WorkspaceId) -> Result<(), TimelineError> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(TimelineError::Closed);
        }
        inner.refreshes.push(workspace_id.clone());
        Ok(())
    }
}
