// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build parameters and the rules deciding which ones a build still needs.

use crate::build::TemplateVersionId;
use serde::{Deserialize, Serialize};

/// A named value supplied by the user for a build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildParameter {
    pub name: String,
    pub value: String,
}

impl BuildParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One allowed value of an option-list parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterOption {
    pub name: String,
    pub value: String,
}

/// A parameter declared by a template version.
///
/// When the backend refuses a build because values are absent, the refused
/// parameters are reported with this shape so the UI can render inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVersionParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    /// Immutable parameters can only be set on the first build
    #[serde(default = "default_mutable")]
    pub mutable: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ParameterOption>,
}

fn default_mutable() -> bool {
    true
}

impl TemplateVersionParameter {
    /// Whether a value must exist before a build can proceed.
    ///
    /// Mutable optional parameters may be left unset; immutable ones are
    /// checked because they may be new to this template version.
    pub fn needs_value(&self) -> bool {
        (self.mutable && self.required) || !self.mutable
    }

    fn accepts(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// Parameters the backend requires before a build against
/// `template_version_id` can proceed. The list keeps template order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedParameters {
    pub template_version_id: TemplateVersionId,
    pub parameters: Vec<TemplateVersionParameter>,
}

impl MissedParameters {
    pub fn names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }
}

fn lookup<'a>(
    name: &str,
    new: &'a [BuildParameter],
    old: &'a [BuildParameter],
) -> Option<&'a BuildParameter> {
    new.iter()
        .find(|p| p.name == name)
        .or_else(|| old.iter().find(|p| p.name == name))
}

/// Compute the template parameters that still need a value.
///
/// `old` holds the parameters of the workspace's latest build, `new` the
/// values the user is submitting now (which take precedence).
pub fn missing_parameters(
    old: &[BuildParameter],
    new: &[BuildParameter],
    template: &[TemplateVersionParameter],
) -> Vec<TemplateVersionParameter> {
    let mut missing: Vec<TemplateVersionParameter> = template
        .iter()
        .filter(|p| p.needs_value() && lookup(&p.name, new, old).is_none())
        .cloned()
        .collect();

    // A value carried over from an older version may no longer be one of the options
    for param in template.iter().filter(|p| !p.options.is_empty()) {
        let Some(current) = lookup(&param.name, new, old) else {
            continue;
        };
        if !param.accepts(&current.value) {
            missing.push(param.clone());
        }
    }

    missing
}

/// Merge the values being submitted over the previous build's values.
pub fn merge_parameters(old: &[BuildParameter], new: &[BuildParameter]) -> Vec<BuildParameter> {
    let mut merged: Vec<BuildParameter> = old
        .iter()
        .map(|p| new.iter().find(|n| n.name == p.name).unwrap_or(p).clone())
        .collect();
    for param in new {
        if !merged.iter().any(|p| p.name == param.name) {
            merged.push(param.clone());
        }
    }
    merged
}

/// Parse `name=value` pairs as given on a command line.
pub fn parse_assignments<'a>(
    args: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<BuildParameter>, String> {
    args.into_iter()
        .map(|arg| match arg.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok(BuildParameter::new(name, value)),
            _ => Err(format!("expected name=value, got '{arg}'")),
        })
        .collect()
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
