// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario files describing the simulated backend a session runs against.

use hatch_adapters::{GatewayOp, InMemoryGateway, TemplateVersion};
use hatch_core::{
    Build, BuildId, BuildParameter, BuildStatus, BuildTransition, GatewayFailure, ParameterOption,
    TemplateId, TemplateVersionParameter, Workspace, WorkspaceId,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scenario used when none is given
pub const SAMPLE: &str = r#"# Simulated backend for `hatch session`.
#
# The template's active version is ahead of the workspace's latest build, so
# `update` will ask for the new `size` parameter.
active_version = "v2"

[workspace]
id = "ws-1"
name = "dev"
template_id = "tpl-1"

[latest_build]
id = "b-1"
build_number = 1
transition = "start"
status = "succeeded"
template_version = "v1"

# Values the latest build was provisioned with
[[parameters]]
name = "region"
value = "eu"

[[versions]]
id = "v1"

[[versions.parameters]]
name = "region"
required = true
options = ["eu", "us"]

[[versions]]
id = "v2"

[[versions.parameters]]
name = "region"
required = true
options = ["eu", "us"]

[[versions.parameters]]
name = "size"
required = true

# Make the next call of an operation fail:
#
# [[faults]]
# op = "start_build"
# status = 409
# message = "A workspace build is already active."
"#;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid scenario {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid fault: {0}")]
    Fault(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Template version updates move to; defaults to the latest build's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_version: Option<String>,
    pub workspace: WorkspaceConfig,
    pub latest_build: BuildConfig,
    #[serde(default)]
    pub parameters: Vec<BuildParameter>,
    #[serde(default)]
    pub versions: Vec<VersionConfig>,
    #[serde(default)]
    pub faults: Vec<FaultConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    pub id: String,
    pub name: String,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    #[serde(default)]
    pub dormant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default = "default_build_id")]
    pub id: String,
    #[serde(default = "default_build_number")]
    pub build_number: u32,
    #[serde(default = "default_transition")]
    pub transition: BuildTransition,
    #[serde(default = "default_status")]
    pub status: BuildStatus,
    pub template_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionConfig {
    pub id: String,
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterConfig {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_mutable")]
    pub mutable: bool,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A scripted failure for the next call of `op`.
///
/// With a `status` the failure is an API error; otherwise a bare message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaultConfig {
    pub op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: String,
}

fn default_template_id() -> String {
    "template".to_string()
}

fn default_build_id() -> String {
    "b-1".to_string()
}

fn default_build_number() -> u32 {
    1
}

fn default_transition() -> BuildTransition {
    BuildTransition::Start
}

fn default_status() -> BuildStatus {
    BuildStatus::Succeeded
}

fn default_mutable() -> bool {
    true
}

impl Scenario {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ScenarioError> {
        toml::from_str(content).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or the built-in sample when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ScenarioError> {
        let Some(path) = path else {
            return Self::parse(SAMPLE, Path::new("<sample>"));
        };
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    pub fn workspace(&self) -> Workspace {
        let build = &self.latest_build;
        Workspace {
            id: WorkspaceId::new(self.workspace.id.as_str()),
            name: self.workspace.name.clone(),
            template_id: TemplateId::new(self.workspace.template_id.as_str()),
            dormant: self.workspace.dormant,
            dormant_at_ms: None,
            deleting_at_ms: None,
            outdated: false,
            latest_build: Build {
                id: BuildId::new(build.id.as_str()),
                build_number: build.build_number,
                transition: build.transition,
                status: build.status,
                template_version_id: build.template_version.as_str().into(),
                log_level: None,
                error: None,
            },
        }
    }

    /// Simulated backend seeded with this scenario, faults queued.
    pub fn gateway(&self) -> Result<InMemoryGateway, ScenarioError> {
        let mut gateway = InMemoryGateway::new(self.workspace());
        for version in &self.versions {
            gateway = gateway.with_version(version.to_version());
        }
        if let Some(active) = &self.active_version {
            gateway = gateway.with_active_version(active.as_str());
        }
        let gateway = gateway.with_parameters(self.parameters.clone());

        for fault in &self.faults {
            let (op, failure) = fault.to_failure()?;
            gateway.fail_next(op, failure);
        }
        Ok(gateway)
    }
}

impl VersionConfig {
    fn to_version(&self) -> TemplateVersion {
        self.parameters
            .iter()
            .fold(TemplateVersion::new(self.id.as_str()), |version, param| {
                version.with_parameter(param.to_parameter())
            })
    }
}

impl ParameterConfig {
    fn to_parameter(&self) -> TemplateVersionParameter {
        TemplateVersionParameter {
            name: self.name.clone(),
            display_name: String::new(),
            description: String::new(),
            required: self.required,
            mutable: self.mutable,
            default_value: self.default_value.clone(),
            options: self
                .options
                .iter()
                .map(|value| ParameterOption {
                    name: value.clone(),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

impl FaultConfig {
    fn to_failure(&self) -> Result<(GatewayOp, GatewayFailure), ScenarioError> {
        let op = self.op.parse::<GatewayOp>().map_err(ScenarioError::Fault)?;
        let failure = match self.status {
            Some(status) => GatewayFailure::api(status, self.message.as_str()),
            None => GatewayFailure::Message(self.message.clone()),
        };
        Ok((op, failure))
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
