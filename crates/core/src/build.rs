// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace builds.
//!
//! A build is one attempt to bring a workspace to a target state. Builds are
//! immutable once returned by the backend; a newer build replaces the older
//! one as the workspace's latest build.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a workspace build.
    pub struct BuildId;
}

crate::define_id! {
    /// Identifier of the immutable template version a build is provisioned from.
    pub struct TemplateVersionId;
}

/// Direction of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildTransition {
    Start,
    Stop,
    Delete,
}

impl fmt::Display for BuildTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildTransition::Start => write!(f, "start"),
            BuildTransition::Stop => write!(f, "stop"),
            BuildTransition::Delete => write!(f, "delete"),
        }
    }
}

/// Provisioning status of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceling,
    Canceled,
}

impl BuildStatus {
    /// Whether the provisioner still has work outstanding for this build
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            BuildStatus::Pending | BuildStatus::Running | BuildStatus::Canceling
        )
    }

    /// Whether this status is terminal (no further transitions expected)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BuildStatus::Succeeded | BuildStatus::Failed | BuildStatus::Canceled
        )
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Pending => write!(f, "pending"),
            BuildStatus::Running => write!(f, "running"),
            BuildStatus::Succeeded => write!(f, "succeeded"),
            BuildStatus::Failed => write!(f, "failed"),
            BuildStatus::Canceling => write!(f, "canceling"),
            BuildStatus::Canceled => write!(f, "canceled"),
        }
    }
}

impl std::str::FromStr for BuildStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BuildStatus::Pending),
            "running" => Ok(BuildStatus::Running),
            "succeeded" => Ok(BuildStatus::Succeeded),
            "failed" => Ok(BuildStatus::Failed),
            "canceling" => Ok(BuildStatus::Canceling),
            "canceled" => Ok(BuildStatus::Canceled),
            other => Err(format!("unknown build status: {other}")),
        }
    }
}

/// Provisioner log verbosity requested for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
        }
    }
}

/// A single workspace build as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: BuildId,
    /// Monotonic per-workspace build number
    #[serde(default)]
    pub build_number: u32,
    pub transition: BuildTransition,
    pub status: BuildStatus,
    pub template_version_id: TemplateVersionId,
    /// Log level the build was requested with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    /// Provisioner error, if the build failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Build {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
