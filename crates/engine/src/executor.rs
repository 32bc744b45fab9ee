// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::RuntimeDeps;
use hatch_adapters::{BuildGateway, NotifyAdapter, NotifyError, TimelineError, TimelineSink};
use hatch_core::{Effect, Event, TracedEffect};
use thiserror::Error;
use tracing::Instrument;

/// Errors that can occur during effect execution.
///
/// Gateway failures are not errors here: they settle the request and come
/// back as `*Failed` events.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),
    #[error("timeline error: {0}")]
    Timeline(#[from] TimelineError),
}

/// Executes effects using the configured adapters
pub struct Executor<G, N, T> {
    gateway: G,
    notifier: N,
    timeline: T,
}

impl<G, N, T> Executor<G, N, T>
where
    G: BuildGateway,
    N: NotifyAdapter,
    T: TimelineSink,
{
    pub fn new(deps: RuntimeDeps<G, N, T>) -> Self {
        Self {
            gateway: deps.gateway,
            notifier: deps.notifier,
            timeline: deps.timeline,
        }
    }

    /// Execute a single effect with tracing
    ///
    /// Returns the settlement event of a gateway call, to be fed back into
    /// the lifecycle machine.
    pub async fn execute(&self, effect: Effect) -> Result<Option<Event>, ExecuteError> {
        let span = tracing::info_span!("effect", effect = effect.name());
        async {
            tracing::info!(fields = ?effect.fields(), "executing");

            let start = std::time::Instant::now();
            let result = self.execute_inner(effect).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(event) => tracing::info!(
                    elapsed_ms,
                    settled = event.as_ref().map(Event::name),
                    "completed"
                ),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn execute_inner(&self, effect: Effect) -> Result<Option<Event>, ExecuteError> {
        let event = match effect {
            // === Build requests ===
            Effect::StartBuild {
                workspace_id,
                template_version_id,
                log_level,
                parameters,
            } => build_settled(
                self.gateway
                    .start_build(&workspace_id, &template_version_id, log_level, parameters)
                    .await,
            ),

            Effect::StopBuild {
                workspace_id,
                log_level,
            } => build_settled(self.gateway.stop_build(&workspace_id, log_level).await),

            Effect::DeleteBuild {
                workspace_id,
                log_level,
            } => build_settled(self.gateway.delete_build(&workspace_id, log_level).await),

            Effect::UpdateToLatest {
                workspace,
                parameters,
            } => match self.gateway.update_to_latest(&workspace, parameters).await {
                Ok(build) => Event::UpdateSucceeded { build },
                Err(error) => Event::UpdateFailed { error },
            },

            Effect::CancelBuild { build_id } => match self.gateway.cancel_build(&build_id).await {
                Ok(response) => Event::CancelSucceeded {
                    message: response.message,
                },
                Err(error) => Event::CancelFailed { error },
            },

            Effect::SetDormant {
                workspace_id,
                dormant,
            } => match self.gateway.set_dormant(&workspace_id, dormant).await {
                Ok(workspace) => Event::ActivateSucceeded {
                    workspace: Box::new(workspace),
                },
                Err(error) => Event::ActivateFailed { error },
            },

            // === Notifications ===
            Effect::RefreshTimeline { workspace_id } => {
                self.timeline.refresh(&workspace_id).await?;
                return Ok(None);
            }

            Effect::Notify { title, message } => {
                self.notifier.notify(&title, &message).await?;
                return Ok(None);
            }
        };

        Ok(Some(event))
    }
}

fn build_settled(result: Result<hatch_core::Build, hatch_core::GatewayFailure>) -> Event {
    match result {
        Ok(build) => Event::BuildSucceeded { build },
        Err(error) => Event::BuildFailed { error },
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
