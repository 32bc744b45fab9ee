// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace snapshot as seen by the orchestrator.
//!
//! The backend owns workspaces. The orchestrator only ever reads the latest
//! snapshot handed to it by its caller, or the one returned by a mutation.

use crate::build::Build;
use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a workspace.
    pub struct WorkspaceId;
}

crate::define_id! {
    /// Identifier of the template a workspace was created from.
    pub struct TemplateId;
}

/// A remotely-provisioned workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub template_id: TemplateId,
    /// Dormant workspaces are inactive and pending deletion unless reactivated
    #[serde(default)]
    pub dormant: bool,
    /// Epoch milliseconds when the workspace became dormant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dormant_at_ms: Option<u64>,
    /// Epoch milliseconds when a dormant workspace will be deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleting_at_ms: Option<u64>,
    /// Whether the latest build is behind the template's active version
    #[serde(default)]
    pub outdated: bool,
    pub latest_build: Build,
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} {})",
            self.name, self.id, self.latest_build.transition, self.latest_build.status
        )?;
        if self.dormant {
            write!(f, " dormant")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
