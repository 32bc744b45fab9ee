// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    Build, BuildId, BuildStatus, BuildTransition, ParameterOption, TemplateId,
    TemplateVersionId, TemplateVersionParameter, Workspace, WorkspaceId,
};

// ── Builders ────────────────────────────────────────────────────────────────

/// Build `b-1` (number 1) on template version `v1`.
pub fn build(transition: BuildTransition, status: BuildStatus) -> Build {
    Build {
        id: BuildId::new("b-1"),
        build_number: 1,
        transition,
        status,
        template_version_id: TemplateVersionId::new("v1"),
        log_level: None,
        error: None,
    }
}

/// Workspace `ws-1` named `dev` with the given latest build.
pub fn workspace(latest_build: Build) -> Workspace {
    Workspace {
        id: WorkspaceId::new("ws-1"),
        name: "dev".to_string(),
        template_id: TemplateId::new("tpl-1"),
        dormant: false,
        dormant_at_ms: None,
        deleting_at_ms: None,
        outdated: false,
        latest_build,
    }
}

pub fn param(name: &str, required: bool, mutable: bool) -> TemplateVersionParameter {
    TemplateVersionParameter {
        name: name.to_string(),
        display_name: String::new(),
        description: String::new(),
        required,
        mutable,
        default_value: String::new(),
        options: Vec::new(),
    }
}

/// Optional mutable parameter restricted to `values`.
pub fn param_with_options(name: &str, values: &[&str]) -> TemplateVersionParameter {
    TemplateVersionParameter {
        options: values
            .iter()
            .map(|v| ParameterOption {
                name: v.to_uppercase(),
                value: v.to_string(),
            })
            .collect(),
        ..param(name, false, true)
    }
}
