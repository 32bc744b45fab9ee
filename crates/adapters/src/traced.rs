// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::gateway::{BuildGateway, CancelResponse};
use async_trait::async_trait;
use hatch_core::{
    Build, BuildId, BuildParameter, GatewayFailure, LogLevel, TemplateVersionId, Workspace,
    WorkspaceId,
};
use std::future::Future;
use tracing::Instrument;

/// Wrapper that adds tracing to any BuildGateway
#[derive(Clone)]
pub struct TracedGateway<G> {
    inner: G,
}

impl<G> TracedGateway<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

/// Run a build call inside `span`, logging entry, timing, and outcome
async fn traced_build<F>(span: tracing::Span, call: F) -> Result<Build, GatewayFailure>
where
    F: Future<Output = Result<Build, GatewayFailure>>,
{
    async {
        tracing::info!("starting");
        let start = std::time::Instant::now();
        let result = call.await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(build) => tracing::info!(
                build_id = %build.id,
                build_number = build.build_number,
                status = %build.status,
                elapsed_ms,
                "build created"
            ),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "build request failed"),
        }
        result
    }
    .instrument(span)
    .await
}

#[async_trait]
impl<G: BuildGateway> BuildGateway for TracedGateway<G> {
    async fn start_build(
        &self,
        workspace_id: &WorkspaceId,
        template_version_id: &TemplateVersionId,
        log_level: Option<LogLevel>,
        parameters: Option<Vec<BuildParameter>>,
    ) -> Result<Build, GatewayFailure> {
        let span = tracing::info_span!(
            "gateway.start_build",
            %workspace_id,
            %template_version_id,
            debug = log_level.is_some(),
            parameters = parameters.as_ref().map_or(0, Vec::len),
        );
        traced_build(
            span,
            self.inner
                .start_build(workspace_id, template_version_id, log_level, parameters),
        )
        .await
    }

    async fn stop_build(
        &self,
        workspace_id: &WorkspaceId,
        log_level: Option<LogLevel>,
    ) -> Result<Build, GatewayFailure> {
        let span = tracing::info_span!(
            "gateway.stop_build",
            %workspace_id,
            debug = log_level.is_some()
        );
        traced_build(span, self.inner.stop_build(workspace_id, log_level)).await
    }

    async fn delete_build(
        &self,
        workspace_id: &WorkspaceId,
        log_level: Option<LogLevel>,
    ) -> Result<Build, GatewayFailure> {
        let span = tracing::info_span!(
            "gateway.delete_build",
            %workspace_id,
            debug = log_level.is_some()
        );
        traced_build(span, self.inner.delete_build(workspace_id, log_level)).await
    }

    async fn update_to_latest(
        &self,
        workspace: &Workspace,
        parameters: Option<Vec<BuildParameter>>,
    ) -> Result<Build, GatewayFailure> {
        let span = tracing::info_span!(
            "gateway.update_to_latest",
            workspace_id = %workspace.id,
            from_version = %workspace.latest_build.template_version_id,
        );
        traced_build(span, self.inner.update_to_latest(workspace, parameters)).await
    }

    async fn cancel_build(&self, build_id: &BuildId) -> Result<CancelResponse, GatewayFailure> {
        async {
            let result = self.inner.cancel_build(build_id).await;
            match &result {
                Ok(response) => tracing::info!(message = %response.message, "cancel accepted"),
                Err(e) => tracing::warn!(error = %e, "cancel refused"),
            }
            result
        }
        .instrument(tracing::info_span!("gateway.cancel_build", %build_id))
        .await
    }

    async fn set_dormant(
        &self,
        workspace_id: &WorkspaceId,
        dormant: bool,
    ) -> Result<Workspace, GatewayFailure> {
        let result = self.inner.set_dormant(workspace_id, dormant).await;
        tracing::info_span!("gateway.set_dormant", %workspace_id, dormant).in_scope(|| {
            match &result {
                Ok(_) => tracing::info!("dormancy updated"),
                Err(e) => tracing::error!(error = %e, "set_dormant failed"),
            }
        });
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
