// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects the lifecycle machine asks the runtime to perform

use crate::build::{BuildId, LogLevel, TemplateVersionId};
use crate::parameter::BuildParameter;
use crate::traced::TracedEffect;
use crate::workspace::{Workspace, WorkspaceId};
use serde::{Deserialize, Serialize};

/// Effects that need to be executed by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    // === Gateway calls ===
    StartBuild {
        workspace_id: WorkspaceId,
        template_version_id: TemplateVersionId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        log_level: Option<LogLevel>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<Vec<BuildParameter>>,
    },

    StopBuild {
        workspace_id: WorkspaceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        log_level: Option<LogLevel>,
    },

    DeleteBuild {
        workspace_id: WorkspaceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        log_level: Option<LogLevel>,
    },

    /// Rebuild against the template's active version
    UpdateToLatest {
        workspace: Box<Workspace>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<Vec<BuildParameter>>,
    },

    /// Server-side cancel of a build; does not abort any local call
    CancelBuild { build_id: BuildId },

    SetDormant {
        workspace_id: WorkspaceId,
        dormant: bool,
    },

    // === Notifications ===
    /// Invalidate the externally cached build history of a workspace
    RefreshTimeline { workspace_id: WorkspaceId },

    /// One-shot user notification
    Notify { title: String, message: String },
}

impl Effect {
    /// Whether executing this effect calls the backend gateway
    pub fn is_gateway_call(&self) -> bool {
        !matches!(self, Effect::RefreshTimeline { .. } | Effect::Notify { .. })
    }

    /// Debug level requested by a build effect, if any
    pub fn log_level(&self) -> Option<LogLevel> {
        match self {
            Effect::StartBuild { log_level, .. }
            | Effect::StopBuild { log_level, .. }
            | Effect::DeleteBuild { log_level, .. } => *log_level,
            _ => None,
        }
    }
}

impl TracedEffect for Effect {
    fn name(&self) -> &'static str {
        match self {
            Effect::StartBuild { .. } => "start_build",
            Effect::StopBuild { .. } => "stop_build",
            Effect::DeleteBuild { .. } => "delete_build",
            Effect::UpdateToLatest { .. } => "update_to_latest",
            Effect::CancelBuild { .. } => "cancel_build",
            Effect::SetDormant { .. } => "set_dormant",
            Effect::RefreshTimeline { .. } => "refresh_timeline",
            Effect::Notify { .. } => "notify",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        fn level(log_level: &Option<LogLevel>) -> String {
            log_level.map(|l| l.to_string()).unwrap_or_default()
        }

        match self {
            Effect::StartBuild {
                workspace_id,
                template_version_id,
                log_level,
                parameters,
            } => vec![
                ("workspace_id", workspace_id.to_string()),
                ("template_version_id", template_version_id.to_string()),
                ("log_level", level(log_level)),
                (
                    "parameters",
                    parameters.as_ref().map_or(0, Vec::len).to_string(),
                ),
            ],
            Effect::StopBuild {
                workspace_id,
                log_level,
            }
            | Effect::DeleteBuild {
                workspace_id,
                log_level,
            } => vec![
                ("workspace_id", workspace_id.to_string()),
                ("log_level", level(log_level)),
            ],
            Effect::UpdateToLatest {
                workspace,
                parameters,
            } => vec![
                ("workspace_id", workspace.id.to_string()),
                (
                    "parameters",
                    parameters.as_ref().map_or(0, Vec::len).to_string(),
                ),
            ],
            Effect::CancelBuild { build_id } => vec![("build_id", build_id.to_string())],
            Effect::SetDormant {
                workspace_id,
                dormant,
            } => vec![
                ("workspace_id", workspace_id.to_string()),
                ("dormant", dormant.to_string()),
            ],
            Effect::RefreshTimeline { workspace_id } => {
                vec![("workspace_id", workspace_id.to_string())]
            }
            Effect::Notify { title, .. } => vec![("title", title.clone())],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
