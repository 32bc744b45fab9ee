// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace build lifecycle state machine.
//!
//! One [`LifecycleState`] exists per open workspace view. Every mutating
//! action is a single-entry, single-exit `Requesting*` phase: the machine
//! enters it and emits exactly one gateway effect, then leaves it when the
//! matching settlement event arrives. Events that are not defined for the
//! current phase are ignored, which is what keeps at most one build request
//! outstanding.

use crate::build::{Build, BuildTransition, LogLevel};
use crate::effect::Effect;
use crate::event::Event;
use crate::failure::{
    classify, error_message, FailureClass, GatewayFailure, DEFAULT_ACTIVATE_ERROR,
    DEFAULT_BUILD_ERROR, DEFAULT_CANCEL_ERROR,
};
use crate::parameter::{BuildParameter, MissedParameters};
use crate::transition::retry_transition;
use crate::workspace::Workspace;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CANCELED_TITLE: &str = "Build canceled";
pub const ACTIVATE_FAILED_TITLE: &str = "Activation failed";

/// Phase of the lifecycle machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    /// Delete confirmation gate; no request made yet
    AskingDelete,
    RequestingUpdate,
    /// Update refused until the listed parameters get values
    AwaitingMissingParameters,
    RequestingStart,
    RequestingStop,
    RequestingDelete,
    RequestingCancel,
    RequestingActivate,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AskingDelete => "asking_delete",
            Phase::RequestingUpdate => "requesting_update",
            Phase::AwaitingMissingParameters => "awaiting_missing_parameters",
            Phase::RequestingStart => "requesting_start",
            Phase::RequestingStop => "requesting_stop",
            Phase::RequestingDelete => "requesting_delete",
            Phase::RequestingCancel => "requesting_cancel",
            Phase::RequestingActivate => "requesting_activate",
        }
    }

    /// Whether a gateway call is outstanding in this phase
    pub fn is_requesting(&self) -> bool {
        matches!(
            self,
            Phase::RequestingUpdate
                | Phase::RequestingStart
                | Phase::RequestingStop
                | Phase::RequestingDelete
                | Phase::RequestingCancel
                | Phase::RequestingActivate
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient data carried alongside the phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_error: Option<String>,
    /// Kept apart from `build_error`: a failed cancel is not a failed build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missed_parameters: Option<MissedParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_message: Option<String>,
    /// Set by a retry, consumed by the next build request, cleared on settlement
    #[serde(default)]
    pub debug: bool,
    /// Build returned by the last successful mutation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build: Option<Build>,
}

/// What a workspace view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleView {
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missed_parameters: Option<MissedParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_message: Option<String>,
    pub debug: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_build: Option<Build>,
}

/// The sole state owned by an orchestrator instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleState {
    pub phase: Phase,
    pub context: MachineContext,
}

impl LifecycleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> LifecycleView {
        let ctx = &self.context;
        LifecycleView {
            phase: self.phase,
            build_error: ctx.build_error.clone(),
            cancellation_error: ctx.cancellation_error.clone(),
            missed_parameters: ctx.missed_parameters.clone(),
            cancellation_message: ctx.cancellation_message.clone(),
            debug: ctx.debug,
            last_build: ctx.last_build.clone(),
        }
    }

    /// Handle an event and return the new state plus effects.
    ///
    /// `workspace` is the latest snapshot known to the caller. Pairs of phase
    /// and event without a defined transition return the state unchanged and
    /// no effects; every defined transition changes the phase.
    pub fn transition(&self, workspace: &Workspace, event: &Event) -> (LifecycleState, Vec<Effect>) {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match (self.phase, event) {
            (Phase::Idle, Event::Start { parameters }) => {
                next.request_start(workspace, parameters.clone(), &mut effects);
            }
            (Phase::Idle, Event::Stop) => next.request_stop(workspace, &mut effects),
            (Phase::Idle, Event::AskDelete) => next.phase = Phase::AskingDelete,
            (Phase::AskingDelete, Event::Delete) => next.request_delete(workspace, &mut effects),
            (Phase::AskingDelete, Event::CancelDelete) => next.phase = Phase::Idle,
            (Phase::Idle | Phase::AwaitingMissingParameters, Event::Update { parameters }) => {
                next.request_update(workspace, parameters.clone(), &mut effects);
            }
            (Phase::Idle, Event::Cancel) => next.request_cancel(workspace, &mut effects),
            (Phase::AwaitingMissingParameters, Event::Cancel) => {
                next.context.missed_parameters = None;
                next.phase = Phase::Idle;
            }
            (Phase::Idle, Event::RetryBuild) => {
                next.context.debug = true;
                match retry_transition(&workspace.latest_build) {
                    BuildTransition::Start => next.request_start(workspace, None, &mut effects),
                    BuildTransition::Stop => next.request_stop(workspace, &mut effects),
                    BuildTransition::Delete => next.request_delete(workspace, &mut effects),
                }
            }
            (Phase::Idle, Event::Activate) => {
                next.phase = Phase::RequestingActivate;
                effects.push(Effect::SetDormant {
                    workspace_id: workspace.id.clone(),
                    dormant: false,
                });
            }

            // -- settlements --
            (
                Phase::RequestingStart | Phase::RequestingStop | Phase::RequestingDelete,
                Event::BuildSucceeded { build },
            )
            | (Phase::RequestingUpdate, Event::UpdateSucceeded { build }) => {
                next.build_settled(workspace, build.clone(), &mut effects);
            }
            (
                Phase::RequestingStart | Phase::RequestingStop | Phase::RequestingDelete,
                Event::BuildFailed { error },
            ) => {
                next.context.debug = false;
                next.context.build_error = Some(error_message(error, DEFAULT_BUILD_ERROR));
                next.phase = Phase::Idle;
            }
            (Phase::RequestingUpdate, Event::UpdateFailed { error }) => next.update_failed(error),
            (Phase::RequestingCancel, Event::CancelSucceeded { message }) => {
                next.context.cancellation_message = Some(message.clone());
                effects.push(Effect::Notify {
                    title: CANCELED_TITLE.to_string(),
                    message: message.clone(),
                });
                next.phase = Phase::Idle;
            }
            (Phase::RequestingCancel, Event::CancelFailed { error }) => {
                next.context.cancellation_error = Some(error_message(error, DEFAULT_CANCEL_ERROR));
                next.phase = Phase::Idle;
            }
            (Phase::RequestingActivate, Event::ActivateSucceeded { .. }) => next.phase = Phase::Idle,
            (Phase::RequestingActivate, Event::ActivateFailed { error }) => {
                effects.push(Effect::Notify {
                    title: ACTIVATE_FAILED_TITLE.to_string(),
                    message: error_message(error, DEFAULT_ACTIVATE_ERROR),
                });
                next.phase = Phase::Idle;
            }

            // Not defined for this phase
            _ => {}
        }

        (next, effects)
    }

    fn log_level(&self) -> Option<LogLevel> {
        self.context.debug.then_some(LogLevel::Debug)
    }

    fn enter_build_request(&mut self, phase: Phase) {
        self.phase = phase;
        self.context.build_error = None;
    }

    fn request_start(
        &mut self,
        workspace: &Workspace,
        parameters: Option<Vec<BuildParameter>>,
        effects: &mut Vec<Effect>,
    ) {
        self.enter_build_request(Phase::RequestingStart);
        effects.push(Effect::StartBuild {
            workspace_id: workspace.id.clone(),
            template_version_id: workspace.latest_build.template_version_id.clone(),
            log_level: self.log_level(),
            parameters,
        });
    }

    fn request_stop(&mut self, workspace: &Workspace, effects: &mut Vec<Effect>) {
        self.enter_build_request(Phase::RequestingStop);
        effects.push(Effect::StopBuild {
            workspace_id: workspace.id.clone(),
            log_level: self.log_level(),
        });
    }

    fn request_delete(&mut self, workspace: &Workspace, effects: &mut Vec<Effect>) {
        self.enter_build_request(Phase::RequestingDelete);
        effects.push(Effect::DeleteBuild {
            workspace_id: workspace.id.clone(),
            log_level: self.log_level(),
        });
    }

    fn request_update(
        &mut self,
        workspace: &Workspace,
        parameters: Option<Vec<BuildParameter>>,
        effects: &mut Vec<Effect>,
    ) {
        self.enter_build_request(Phase::RequestingUpdate);
        self.context.missed_parameters = None;
        effects.push(Effect::UpdateToLatest {
            workspace: Box::new(workspace.clone()),
            parameters,
        });
    }

    fn request_cancel(&mut self, workspace: &Workspace, effects: &mut Vec<Effect>) {
        self.phase = Phase::RequestingCancel;
        self.context.cancellation_error = None;
        self.context.cancellation_message = None;
        effects.push(Effect::CancelBuild {
            build_id: workspace.latest_build.id.clone(),
        });
    }

    fn build_settled(&mut self, workspace: &Workspace, build: Build, effects: &mut Vec<Effect>) {
        self.context.last_build = Some(build);
        self.context.debug = false;
        effects.push(Effect::RefreshTimeline {
            workspace_id: workspace.id.clone(),
        });
        self.phase = Phase::Idle;
    }

    fn update_failed(&mut self, error: &GatewayFailure) {
        self.context.debug = false;
        match classify(error, DEFAULT_BUILD_ERROR) {
            FailureClass::MissingParameters(missed) => {
                self.context.missed_parameters = Some(missed);
                self.phase = Phase::AwaitingMissingParameters;
            }
            FailureClass::Generic { message } => {
                self.context.build_error = Some(message);
                self.phase = Phase::Idle;
            }
        }
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
