// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hatch-core: Pure domain model for the Hatch workspace build orchestrator

pub mod build;
pub mod effect;
pub mod event;
pub mod failure;
pub mod id;
pub mod machine;
pub mod parameter;
pub mod traced;
pub mod transition;
pub mod workspace;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use build::{Build, BuildId, BuildStatus, BuildTransition, LogLevel, TemplateVersionId};
pub use effect::Effect;
pub use event::Event;
pub use failure::{
    classify, error_message, ApiError, FailureClass, GatewayFailure, ValidationError,
    DEFAULT_ACTIVATE_ERROR, DEFAULT_BUILD_ERROR, DEFAULT_CANCEL_ERROR,
};
pub use machine::{LifecycleState, LifecycleView, MachineContext, Phase};
pub use parameter::{
    merge_parameters, missing_parameters, parse_assignments, BuildParameter, MissedParameters,
    ParameterOption, TemplateVersionParameter,
};
pub use traced::TracedEffect;
pub use transition::{retry_transition, was_deleting, was_starting, was_stopping};
pub use workspace::{TemplateId, Workspace, WorkspaceId};
