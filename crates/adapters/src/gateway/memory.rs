// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory simulated backend.
//!
//! Holds one workspace, its template versions, and the parameters of the
//! latest build. Enforces the backend's build rules: one active build per
//! workspace, cancel only while the job is still pending or running, and
//! updates refused while the active version has parameters without values.

use super::{BuildGateway, CancelResponse, GatewayOp};
use async_trait::async_trait;
use hatch_core::{
    merge_parameters, missing_parameters, ApiError, Build, BuildId, BuildParameter, BuildStatus,
    BuildTransition, GatewayFailure, LogLevel, TemplateVersionId,
    TemplateVersionParameter, ValidationError, Workspace, WorkspaceId,
};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub const BUILD_ACTIVE: &str = "A workspace build is already active.";
pub const JOB_COMPLETED: &str = "Job has already completed!";
pub const JOB_ALREADY_CANCELED: &str = "Job has already been marked as canceled!";
pub const JOB_CANCELED: &str = "Job has been marked as canceled...";

/// A template version and the parameters it declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVersion {
    pub id: TemplateVersionId,
    pub parameters: Vec<TemplateVersionParameter>,
}

impl TemplateVersion {
    pub fn new(id: impl Into<TemplateVersionId>) -> Self {
        Self {
            id: id.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: TemplateVersionParameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

#[derive(Debug)]
struct MemoryState {
    workspace: Workspace,
    versions: Vec<TemplateVersion>,
    active_version: TemplateVersionId,
    /// Parameters the latest build was provisioned with
    parameters: Vec<BuildParameter>,
    faults: HashMap<GatewayOp, VecDeque<GatewayFailure>>,
    history: Vec<Build>,
    next_build: u64,
}

impl MemoryState {
    fn take_fault(&mut self, op: GatewayOp) -> Result<(), GatewayFailure> {
        match self.faults.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn check_workspace(&self, workspace_id: &WorkspaceId) -> Result<(), GatewayFailure> {
        if self.workspace.id != *workspace_id {
            return Err(GatewayFailure::api(404, "Workspace not found."));
        }
        Ok(())
    }

    fn check_no_active_build(&self) -> Result<(), GatewayFailure> {
        if self.workspace.latest_build.is_active() {
            return Err(GatewayFailure::api(409, BUILD_ACTIVE));
        }
        Ok(())
    }

    fn version(&self, id: &TemplateVersionId) -> Result<&TemplateVersion, GatewayFailure> {
        self.versions
            .iter()
            .find(|v| v.id == *id)
            .ok_or_else(|| GatewayFailure::api(404, "Template version not found."))
    }

    fn refresh_outdated(&mut self) {
        self.workspace.outdated =
            self.workspace.latest_build.template_version_id != self.active_version;
    }

    /// Next `build-N` id that no build in the history already uses
    fn mint_build_id(&mut self) -> BuildId {
        loop {
            let id = format!("build-{}", self.next_build);
            self.next_build += 1;
            if !self.history.iter().any(|b| b.id == id.as_str()) {
                return BuildId::new(id);
            }
        }
    }

    fn push_build(
        &mut self,
        transition: BuildTransition,
        template_version_id: TemplateVersionId,
        log_level: Option<LogLevel>,
    ) -> Build {
        let build = Build {
            id: self.mint_build_id(),
            build_number: self.workspace.latest_build.build_number + 1,
            transition,
            status: BuildStatus::Pending,
            template_version_id,
            log_level,
            error: None,
        };
        self.workspace.latest_build = build.clone();
        self.history.push(build.clone());
        self.refresh_outdated();
        build
    }
}

/// Simulated backend gateway for local sessions and tests
#[derive(Debug, Clone)]
pub struct InMemoryGateway {
    inner: Arc<Mutex<MemoryState>>,
}

impl InMemoryGateway {
    /// Gateway holding `workspace`, whose latest build's version becomes the
    /// only known (and active) template version.
    pub fn new(workspace: Workspace) -> Self {
        let version = TemplateVersion::new(workspace.latest_build.template_version_id.clone());
        let mut state = MemoryState {
            active_version: version.id.clone(),
            versions: vec![version],
            parameters: Vec::new(),
            faults: HashMap::new(),
            history: vec![workspace.latest_build.clone()],
            next_build: 1,
            workspace,
        };
        state.refresh_outdated();
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Add (or replace) a template version
    pub fn with_version(self, version: TemplateVersion) -> Self {
        {
            let mut state = self.inner.lock();
            state.versions.retain(|v| v.id != version.id);
            state.versions.push(version);
        }
        self
    }

    /// Promote a version to the template's active version
    pub fn with_active_version(self, id: impl Into<TemplateVersionId>) -> Self {
        {
            let mut state = self.inner.lock();
            let id = id.into();
            if !state.versions.iter().any(|v| v.id == id) {
                state.versions.push(TemplateVersion::new(id.clone()));
            }
            state.active_version = id;
            state.refresh_outdated();
        }
        self
    }

    /// Parameters the latest build was provisioned with
    pub fn with_parameters(self, parameters: Vec<BuildParameter>) -> Self {
        self.inner.lock().parameters = parameters;
        self
    }

    /// Make the next call of `op` fail with `failure`. Faults queue up per operation.
    pub fn fail_next(&self, op: GatewayOp, failure: GatewayFailure) {
        self.inner
            .lock()
            .faults
            .entry(op)
            .or_default()
            .push_back(failure);
    }

    /// Simulate the provisioner finishing the latest build
    pub fn complete_latest(&self, status: BuildStatus) -> Build {
        let mut state = self.inner.lock();
        let latest = &mut state.workspace.latest_build;
        latest.status = status;
        latest.error = (status == BuildStatus::Failed).then(|| "provisioner failed".to_string());
        let build = latest.clone();
        if let Some(entry) = state.history.iter_mut().rev().find(|b| b.id == build.id) {
            *entry = build.clone();
        }
        build
    }

    /// Current workspace snapshot
    pub fn workspace(&self) -> Workspace {
        self.inner.lock().workspace.clone()
    }

    pub fn parameters(&self) -> Vec<BuildParameter> {
        self.inner.lock().parameters.clone()
    }

    pub fn active_version(&self) -> TemplateVersionId {
        self.inner.lock().active_version.clone()
    }

    /// Every build of the workspace, oldest first
    pub fn history(&self) -> Vec<Build> {
        self.inner.lock().history.clone()
    }

    /// Parameters of the active version that still need a value
    pub fn missing_for_update(&self, new: &[BuildParameter]) -> Vec<TemplateVersionParameter> {
        let state = self.inner.lock();
        match state.version(&state.active_version) {
            Ok(version) => missing_parameters(&state.parameters, new, &version.parameters),
            Err(_) => Vec::new(),
        }
    }

    fn simple_build(
        &self,
        op: GatewayOp,
        workspace_id: &WorkspaceId,
        transition: BuildTransition,
        log_level: Option<LogLevel>,
    ) -> Result<Build, GatewayFailure> {
        let mut state = self.inner.lock();
        state.take_fault(op)?;
        state.check_workspace(workspace_id)?;
        state.check_no_active_build()?;
        let version = state.workspace.latest_build.template_version_id.clone();
        Ok(state.push_build(transition, version, log_level))
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[async_trait]
impl BuildGateway for InMemoryGateway {
    async fn start_build(
        &self,
        workspace_id: &WorkspaceId,
        template_version_id: &TemplateVersionId,
        log_level: Option<LogLevel>,
        parameters: Option<Vec<BuildParameter>>,
    ) -> Result<Build, GatewayFailure> {
        let mut state = self.inner.lock();
        state.take_fault(GatewayOp::StartBuild)?;
        state.check_workspace(workspace_id)?;
        state.check_no_active_build()?;

        let new = parameters.unwrap_or_default();
        let version = state.version(template_version_id)?;
        let missing = missing_parameters(&state.parameters, &new, &version.parameters);
        if !missing.is_empty() {
            return Err(GatewayFailure::Api(ApiError {
                status: 400,
                message: "Unable to validate parameters.".to_string(),
                detail: None,
                validations: missing
                    .into_iter()
                    .map(|p| ValidationError {
                        field: p.name,
                        detail: "Parameter value is required.".to_string(),
                    })
                    .collect(),
            }));
        }

        state.parameters = merge_parameters(&state.parameters, &new);
        Ok(state.push_build(
            BuildTransition::Start,
            template_version_id.clone(),
            log_level,
        ))
    }

    async fn stop_build(
        &self,
        workspace_id: &WorkspaceId,
        log_level: Option<LogLevel>,
    ) -> Result<Build, GatewayFailure> {
        self.simple_build(
            GatewayOp::StopBuild,
            workspace_id,
            BuildTransition::Stop,
            log_level,
        )
    }

    async fn delete_build(
        &self,
        workspace_id: &WorkspaceId,
        log_level: Option<LogLevel>,
    ) -> Result<Build, GatewayFailure> {
        self.simple_build(
            GatewayOp::DeleteBuild,
            workspace_id,
            BuildTransition::Delete,
            log_level,
        )
    }

    async fn update_to_latest(
        &self,
        workspace: &Workspace,
        parameters: Option<Vec<BuildParameter>>,
    ) -> Result<Build, GatewayFailure> {
        let mut state = self.inner.lock();
        state.take_fault(GatewayOp::UpdateToLatest)?;
        state.check_workspace(&workspace.id)?;
        state.check_no_active_build()?;

        let new = parameters.unwrap_or_default();
        let active = state.active_version.clone();
        let version = state.version(&active)?;
        let missing = missing_parameters(&state.parameters, &new, &version.parameters);
        if !missing.is_empty() {
            return Err(GatewayFailure::MissingParameters {
                parameters: missing,
                template_version_id: active,
            });
        }

        state.parameters = merge_parameters(&state.parameters, &new);
        Ok(state.push_build(BuildTransition::Start, active, None))
    }

    async fn cancel_build(&self, build_id: &BuildId) -> Result<CancelResponse, GatewayFailure> {
        let mut state = self.inner.lock();
        state.take_fault(GatewayOp::CancelBuild)?;
        if state.workspace.latest_build.id != *build_id {
            return Err(GatewayFailure::api(404, "Build not found."));
        }

        let latest = &mut state.workspace.latest_build;
        if latest.status.is_terminal() {
            return Err(GatewayFailure::api(412, JOB_COMPLETED));
        }
        latest.status = match latest.status {
            BuildStatus::Canceling => {
                return Err(GatewayFailure::api(412, JOB_ALREADY_CANCELED));
            }
            BuildStatus::Running => BuildStatus::Canceling,
            // A job no provisioner picked up completes immediately
            _ => BuildStatus::Canceled,
        };

        let build = latest.clone();
        if let Some(entry) = state.history.iter_mut().rev().find(|b| b.id == build.id) {
            *entry = build;
        }
        Ok(CancelResponse {
            message: JOB_CANCELED.to_string(),
        })
    }

    async fn set_dormant(
        &self,
        workspace_id: &WorkspaceId,
        dormant: bool,
    ) -> Result<Workspace, GatewayFailure> {
        let mut state = self.inner.lock();
        state.take_fault(GatewayOp::SetDormant)?;
        state.check_workspace(workspace_id)?;

        let workspace = &mut state.workspace;
        workspace.dormant = dormant;
        if dormant {
            workspace.dormant_at_ms = Some(now_ms());
        } else {
            workspace.dormant_at_ms = None;
            workspace.deleting_at_ms = None;
        }
        Ok(workspace.clone())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
