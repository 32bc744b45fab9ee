// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend gateway adapters

mod memory;

pub use memory::{InMemoryGateway, TemplateVersion};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBuildGateway, GatewayCall};

use async_trait::async_trait;
use hatch_core::{
    Build, BuildId, BuildParameter, GatewayFailure, LogLevel, TemplateVersionId, Workspace,
    WorkspaceId,
};
use std::fmt;
use std::str::FromStr;

/// Response of a successful cancel request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelResponse {
    pub message: String,
}

/// Gateway operations, used to address injected faults and recorded calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    StartBuild,
    StopBuild,
    DeleteBuild,
    UpdateToLatest,
    CancelBuild,
    SetDormant,
}

impl GatewayOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayOp::StartBuild => "start_build",
            GatewayOp::StopBuild => "stop_build",
            GatewayOp::DeleteBuild => "delete_build",
            GatewayOp::UpdateToLatest => "update_to_latest",
            GatewayOp::CancelBuild => "cancel_build",
            GatewayOp::SetDormant => "set_dormant",
        }
    }
}

impl fmt::Display for GatewayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GatewayOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start_build" => Ok(GatewayOp::StartBuild),
            "stop_build" => Ok(GatewayOp::StopBuild),
            "delete_build" => Ok(GatewayOp::DeleteBuild),
            "update_to_latest" => Ok(GatewayOp::UpdateToLatest),
            "cancel_build" => Ok(GatewayOp::CancelBuild),
            "set_dormant" => Ok(GatewayOp::SetDormant),
            other => Err(format!("unknown gateway operation: {other}")),
        }
    }
}

/// Adapter for the workspace backend.
///
/// Each call is atomic from the caller's perspective: it either returns the
/// new build (or workspace) or a [`GatewayFailure`].
#[async_trait]
pub trait BuildGateway: Clone + Send + Sync + 'static {
    async fn start_build(
        &self,
        workspace_id: &WorkspaceId,
        template_version_id: &TemplateVersionId,
        log_level: Option<LogLevel>,
        parameters: Option<Vec<BuildParameter>>,
    ) -> Result<Build, GatewayFailure>;

    async fn stop_build(
        &self,
        workspace_id: &WorkspaceId,
        log_level: Option<LogLevel>,
    ) -> Result<Build, GatewayFailure>;

    async fn delete_build(
        &self,
        workspace_id: &WorkspaceId,
        log_level: Option<LogLevel>,
    ) -> Result<Build, GatewayFailure>;

    /// Rebuild the workspace against its template's active version.
    ///
    /// Fails with [`GatewayFailure::MissingParameters`] when the active
    /// version declares parameters that have no value yet.
    async fn update_to_latest(
        &self,
        workspace: &Workspace,
        parameters: Option<Vec<BuildParameter>>,
    ) -> Result<Build, GatewayFailure>;

    async fn cancel_build(&self, build_id: &BuildId) -> Result<CancelResponse, GatewayFailure>;

    async fn set_dormant(
        &self,
        workspace_id: &WorkspaceId,
        dormant: bool,
    ) -> Result<Workspace, GatewayFailure>;
}
