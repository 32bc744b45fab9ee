// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording notifier for tests
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// A notice the fake was asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyCall {
    pub title: String,
    pub message: String,
}

#[derive(Default)]
struct FakeNotifyState {
    shown: Vec<NotifyCall>,
    unavailable: Option<String>,
}

/// Records notices instead of showing them. Clones share the record.
#[derive(Clone, Default)]
pub struct FakeNotifyAdapter {
    state: Arc<Mutex<FakeNotifyState>>,
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices shown so far, oldest first
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.state.lock().shown.clone()
    }

    /// Refuse every later notice as if no notification service were running
    pub fn set_unavailable(&self, reason: &str) {
        self.state.lock().unavailable = Some(reason.to_string());
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let mut state = self.state.lock();
        if let Some(reason) = state.unavailable.clone() {
            return Err(NotifyError::Unavailable(reason));
        }
        state.shown.push(NotifyCall {
            title: title.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
