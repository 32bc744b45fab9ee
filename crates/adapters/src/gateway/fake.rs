// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake gateway for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BuildGateway, CancelResponse, GatewayOp};
use async_trait::async_trait;
use hatch_core::test_support::{build, workspace};
use hatch_core::{
    Build, BuildId, BuildParameter, BuildStatus, BuildTransition, GatewayFailure, LogLevel,
    TemplateVersionId, Workspace, WorkspaceId,
};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::watch;

/// Recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    StartBuild {
        workspace_id: WorkspaceId,
        template_version_id: TemplateVersionId,
        log_level: Option<LogLevel>,
        parameters: Option<Vec<BuildParameter>>,
    },
    StopBuild {
        workspace_id: WorkspaceId,
        log_level: Option<LogLevel>,
    },
    DeleteBuild {
        workspace_id: WorkspaceId,
        log_level: Option<LogLevel>,
    },
    UpdateToLatest {
        workspace_id: WorkspaceId,
        parameters: Option<Vec<BuildParameter>>,
    },
    CancelBuild {
        build_id: BuildId,
    },
    SetDormant {
        workspace_id: WorkspaceId,
        dormant: bool,
    },
}

impl GatewayCall {
    pub fn op(&self) -> GatewayOp {
        match self {
            GatewayCall::StartBuild { .. } => GatewayOp::StartBuild,
            GatewayCall::StopBuild { .. } => GatewayOp::StopBuild,
            GatewayCall::DeleteBuild { .. } => GatewayOp::DeleteBuild,
            GatewayCall::UpdateToLatest { .. } => GatewayOp::UpdateToLatest,
            GatewayCall::CancelBuild { .. } => GatewayOp::CancelBuild,
            GatewayCall::SetDormant { .. } => GatewayOp::SetDormant,
        }
    }

    pub fn log_level(&self) -> Option<LogLevel> {
        match self {
            GatewayCall::StartBuild { log_level, .. }
            | GatewayCall::StopBuild { log_level, .. }
            | GatewayCall::DeleteBuild { log_level, .. } => *log_level,
            _ => None,
        }
    }
}

struct FakeGatewayState {
    calls: Vec<GatewayCall>,
    failures: HashMap<GatewayOp, VecDeque<GatewayFailure>>,
    workspace: Workspace,
    cancel_message: String,
    next_build: u32,
}

/// Fake gateway for testing.
///
/// Every call is recorded before it settles. Successful build calls return a
/// pending build `build-N`; failures are scripted per operation. While the
/// gate is held, calls stay in flight until [`FakeBuildGateway::release`].
#[derive(Clone)]
pub struct FakeBuildGateway {
    inner: Arc<Mutex<FakeGatewayState>>,
    gate: Arc<watch::Sender<bool>>,
}

impl Default for FakeBuildGateway {
    fn default() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            inner: Arc::new(Mutex::new(FakeGatewayState {
                calls: Vec::new(),
                failures: HashMap::new(),
                workspace: workspace(build(BuildTransition::Start, BuildStatus::Succeeded)),
                cancel_message: "Job has been marked as canceled...".to_string(),
                next_build: 0,
            })),
            gate: Arc::new(gate),
        }
    }
}

impl FakeBuildGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace returned by `set_dormant`
    pub fn with_workspace(self, workspace: Workspace) -> Self {
        self.inner.lock().workspace = workspace;
        self
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.inner.lock().calls.clone()
    }

    /// Recorded calls of one operation
    pub fn calls_of(&self, op: GatewayOp) -> Vec<GatewayCall> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| c.op() == op)
            .cloned()
            .collect()
    }

    /// Queue a failure for the next call of `op`
    pub fn fail_next(&self, op: GatewayOp, failure: GatewayFailure) {
        self.inner
            .lock()
            .failures
            .entry(op)
            .or_default()
            .push_back(failure);
    }

    pub fn set_cancel_message(&self, message: &str) {
        self.inner.lock().cancel_message = message.to_string();
    }

    /// Keep subsequent calls in flight until [`release`](Self::release)
    pub fn hold(&self) {
        self.gate.send_replace(false);
    }

    /// Let held calls settle
    pub fn release(&self) {
        self.gate.send_replace(true);
    }

    fn record(&self, call: GatewayCall) -> Option<GatewayFailure> {
        let mut inner = self.inner.lock();
        let op = call.op();
        inner.calls.push(call);
        inner.failures.get_mut(&op).and_then(VecDeque::pop_front)
    }

    async fn settle(&self) {
        let mut rx = self.gate.subscribe();
        // The sender lives as long as `self`, so this only returns once open
        let _ = rx.wait_for(|open| *open).await;
    }

    fn next_build(
        &self,
        transition: BuildTransition,
        template_version_id: Option<TemplateVersionId>,
        log_level: Option<LogLevel>,
    ) -> Build {
        let mut inner = self.inner.lock();
        inner.next_build += 1;
        let latest = &inner.workspace.latest_build;
        let build = Build {
            id: BuildId::new(format!("build-{}", inner.next_build)),
            build_number: latest.build_number + 1,
            transition,
            status: BuildStatus::Pending,
            template_version_id: template_version_id
                .unwrap_or_else(|| latest.template_version_id.clone()),
            log_level,
            error: None,
        };
        inner.workspace.latest_build = build.clone();
        build
    }

    async fn build_call(
        &self,
        call: GatewayCall,
        transition: BuildTransition,
        template_version_id: Option<TemplateVersionId>,
    ) -> Result<Build, GatewayFailure> {
        let log_level = call.log_level();
        let failure = self.record(call);
        self.settle().await;
        match failure {
            Some(failure) => Err(failure),
            None => Ok(self.next_build(transition, template_version_id, log_level)),
        }
    }
}

#[async_trait]
impl BuildGateway for FakeBuildGateway {
    async fn start_build(
        &self,
        workspace_id: &WorkspaceId,
        template_version_id: &TemplateVersionId,
        log_level: Option<LogLevel>,
        parameters: Option<Vec<BuildParameter>>,
    ) -> Result<Build, GatewayFailure> {
        let call = GatewayCall::StartBuild {
            workspace_id: workspace_id.clone(),
            template_version_id: template_version_id.clone(),
            log_level,
            parameters,
        };
        self.build_call(
            call,
            BuildTransition::Start,
            Some(template_version_id.clone()),
        )
        .await
    }

    async fn stop_build(
        &self,
        workspace_id: &WorkspaceId,
        log_level: Option<LogLevel>,
    ) -> Result<Build, GatewayFailure> {
        let call = GatewayCall::StopBuild {
            workspace_id: workspace_id.clone(),
            log_level,
        };
        self.build_call(call, BuildTransition::Stop, None).await
    }

    async fn delete_build(
        &self,
        workspace_id: &WorkspaceId,
        log_level: Option<LogLevel>,
    ) -> Result<Build, GatewayFailure> {
        let call = GatewayCall::DeleteBuild {
            workspace_id: workspace_id.clone(),
            log_level,
        };
        self.build_call(call, BuildTransition::Delete, None).await
    }

    async fn update_to_latest(
        &self,
        workspace: &Workspace,
        parameters: Option<Vec<BuildParameter>>,
    ) -> Result<Build, GatewayFailure> {
        let call = GatewayCall::UpdateToLatest {
            workspace_id: workspace.id.clone(),
            parameters,
        };
        self.build_call(call, BuildTransition::Start, None).await
    }

    async fn cancel_build(&self, build_id: &BuildId) -> Result<CancelResponse, GatewayFailure> {
        let failure = self.record(GatewayCall::CancelBuild {
            build_id: build_id.clone(),
        });
        self.settle().await;
        match failure {
            Some(failure) => Err(failure),
            None => Ok(CancelResponse {
                message: self.inner.lock().cancel_message.clone(),
            }),
        }
    }

    async fn set_dormant(
        &self,
        workspace_id: &WorkspaceId,
        dormant: bool,
    ) -> Result<Workspace, GatewayFailure> {
        let failure = self.record(GatewayCall::SetDormant {
            workspace_id: workspace_id.clone(),
            dormant,
        });
        self.settle().await;
        match failure {
            Some(failure) => Err(failure),
            None => {
                let mut inner = self.inner.lock();
                inner.workspace.dormant = dormant;
                Ok(inner.workspace.clone())
            }
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
