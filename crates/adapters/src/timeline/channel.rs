// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel-backed timeline sink.

use super::{TimelineError, TimelineSink};
use async_trait::async_trait;
use hatch_core::WorkspaceId;
use tokio::sync::mpsc;

/// Forwards refresh requests to a cache invalidator over an unbounded channel
#[derive(Clone, Debug)]
pub struct ChannelTimelineSink {
    tx: mpsc::UnboundedSender<WorkspaceId>,
}

impl ChannelTimelineSink {
    /// Create a sink and the receiver the cache owner listens on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WorkspaceId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl TimelineSink for ChannelTimelineSink {
    async fn refresh(&self, workspace_id: &WorkspaceId) -> Result<(), TimelineError> {
        self.tx
            .send(workspace_id.clone())
            .map_err(|_| TimelineError::Closed)
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
