// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events that drive the lifecycle machine.
//!
//! UI events are sent by the workspace view; settlement events are produced
//! by the executor when a gateway call resolves. Serializes with
//! `{"type": "scope:name", ...fields}` format.

use crate::build::Build;
use crate::failure::GatewayFailure;
use crate::parameter::BuildParameter;
use crate::workspace::Workspace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    // -- ui --
    #[serde(rename = "build:start")]
    Start {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<Vec<BuildParameter>>,
    },

    #[serde(rename = "build:stop")]
    Stop,

    /// Open the delete confirmation gate
    #[serde(rename = "delete:ask")]
    AskDelete,

    /// Confirm the delete
    #[serde(rename = "delete:confirm")]
    Delete,

    #[serde(rename = "delete:dismiss")]
    CancelDelete,

    /// Update the workspace to the template's active version
    #[serde(rename = "build:update")]
    Update {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<Vec<BuildParameter>>,
    },

    #[serde(rename = "build:cancel")]
    Cancel,

    /// Re-issue the latest build's transition with debug logging
    #[serde(rename = "build:retry")]
    RetryBuild,

    #[serde(rename = "workspace:activate")]
    Activate,

    // -- settlement --
    #[serde(rename = "build:succeeded")]
    BuildSucceeded { build: Build },

    #[serde(rename = "build:failed")]
    BuildFailed { error: GatewayFailure },

    #[serde(rename = "update:succeeded")]
    UpdateSucceeded { build: Build },

    #[serde(rename = "update:failed")]
    UpdateFailed { error: GatewayFailure },

    #[serde(rename = "cancel:succeeded")]
    CancelSucceeded { message: String },

    #[serde(rename = "cancel:failed")]
    CancelFailed { error: GatewayFailure },

    #[serde(rename = "activate:succeeded")]
    ActivateSucceeded { workspace: Box<Workspace> },

    #[serde(rename = "activate:failed")]
    ActivateFailed { error: GatewayFailure },
}

impl Event {
    pub fn start() -> Self {
        Event::Start { parameters: None }
    }

    pub fn update() -> Self {
        Event::Update { parameters: None }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Start { .. } => "build:start",
            Event::Stop => "build:stop",
            Event::AskDelete => "delete:ask",
            Event::Delete => "delete:confirm",
            Event::CancelDelete => "delete:dismiss",
            Event::Update { .. } => "build:update",
            Event::Cancel => "build:cancel",
            Event::RetryBuild => "build:retry",
            Event::Activate => "workspace:activate",
            Event::BuildSucceeded { .. } => "build:succeeded",
            Event::BuildFailed { .. } => "build:failed",
            Event::UpdateSucceeded { .. } => "update:succeeded",
            Event::UpdateFailed { .. } => "update:failed",
            Event::CancelSucceeded { .. } => "cancel:succeeded",
            Event::CancelFailed { .. } => "cancel:failed",
            Event::ActivateSucceeded { .. } => "activate:succeeded",
            Event::ActivateFailed { .. } => "activate:failed",
        }
    }

    /// Whether this event reports the outcome of a gateway call
    pub fn is_settlement(&self) -> bool {
        matches!(
            self,
            Event::BuildSucceeded { .. }
                | Event::BuildFailed { .. }
                | Event::UpdateSucceeded { .. }
                | Event::UpdateFailed { .. }
                | Event::CancelSucceeded { .. }
                | Event::CancelFailed { .. }
                | Event::ActivateSucceeded { .. }
                | Event::ActivateFailed { .. }
        )
    }

    /// One-line summary for log output
    pub fn log_summary(&self) -> String {
        let t = self.name();
        match self {
            Event::Start { parameters } | Event::Update { parameters } => {
                let count = parameters.as_ref().map_or(0, Vec::len);
                format!("{t} parameters={count}")
            }
            Event::BuildSucceeded { build } | Event::UpdateSucceeded { build } => {
                format!(
                    "{t} build={} transition={} status={}",
                    build.id, build.transition, build.status
                )
            }
            Event::BuildFailed { error }
            | Event::UpdateFailed { error }
            | Event::CancelFailed { error }
            | Event::ActivateFailed { error } => format!("{t} error={error}"),
            Event::CancelSucceeded { message } => format!("{t} message={message:?}"),
            Event::ActivateSucceeded { workspace } => {
                format!("{t} workspace={} dormant={}", workspace.id, workspace.dormant)
            }
            Event::Stop
            | Event::AskDelete
            | Event::Delete
            | Event::CancelDelete
            | Event::Cancel
            | Event::RetryBuild
            | Event::Activate => t.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
