// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gateway failures and their classification.
//!
//! Every backend call can fail in heterogeneous ways. The classifier folds
//! them into the two outcomes the lifecycle machine distinguishes: the
//! recoverable missing-parameters refusal, and everything else.

use crate::build::TemplateVersionId;
use crate::parameter::{MissedParameters, TemplateVersionParameter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BUILD_ERROR: &str = "Failed to build workspace.";
pub const DEFAULT_CANCEL_ERROR: &str = "Failed to cancel workspace build.";
pub const DEFAULT_ACTIVATE_ERROR: &str = "Failed to activate workspace.";

/// Field-scoped validation message returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub detail: String,
}

/// Structured error response from the backend API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    /// Actionable, user-facing sentence
    #[serde(default)]
    pub message: String,
    /// Technical detail for debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationError>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
            validations: Vec::new(),
        }
    }
}

/// Failure value produced by a gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum GatewayFailure {
    /// The backend refused a build because required inputs are absent
    #[error("missing build parameters for {template_version_id}")]
    MissingParameters {
        parameters: Vec<TemplateVersionParameter>,
        template_version_id: TemplateVersionId,
    },
    #[error("api error {}: {}", .0.status, .0.message)]
    Api(ApiError),
    /// A bare string failure
    #[error("{0}")]
    Message(String),
    /// Connection-level failure; its text is diagnostic only
    #[error("transport error: {0}")]
    Transport(String),
}

impl GatewayFailure {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        GatewayFailure::Api(ApiError::new(status, message))
    }
}

/// Classification of a gateway failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureClass {
    MissingParameters(MissedParameters),
    Generic { message: String },
}

/// Extract the user-facing message from a failure.
///
/// Preference order: a structured API error's message, then a bare string
/// failure, then `default`.
pub fn error_message(failure: &GatewayFailure, default: &str) -> String {
    match failure {
        GatewayFailure::Api(api) if !api.message.is_empty() => api.message.clone(),
        GatewayFailure::Message(text) if !text.is_empty() => text.clone(),
        _ => default.to_string(),
    }
}

/// Classify a failure, falling back to `default` for the generic message.
pub fn classify(failure: &GatewayFailure, default: &str) -> FailureClass {
    match failure {
        GatewayFailure::MissingParameters {
            parameters,
            template_version_id,
        } if !parameters.is_empty() && !template_version_id.is_empty() => {
            FailureClass::MissingParameters(MissedParameters {
                template_version_id: template_version_id.clone(),
                parameters: parameters.clone(),
            })
        }
        other => FailureClass::Generic {
            message: error_message(other, default),
        },
    }
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
