// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use hatch_core::{Build, LifecycleView, MissedParameters, TemplateVersionParameter, Workspace};
use serde::Serialize;

use crate::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print one value as a single JSON line.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn line(buf: &mut String, label: &str, value: &str) {
    buf.push_str(&color::context(&format!("{label}:")));
    buf.push(' ');
    buf.push_str(value);
    buf.push('\n');
}

/// `#3 start succeeded (v1)`
pub fn format_build(build: &Build) -> String {
    format!(
        "#{} {} {} {}",
        build.build_number,
        build.transition,
        color::status(&build.status.to_string()),
        color::muted(&format!("({})", build.template_version_id)),
    )
}

/// Text rendering of what a workspace view shows.
///
/// Only the phase is always present; everything else is printed when set.
pub fn format_view(view: &LifecycleView) -> String {
    let mut buf = String::new();
    line(&mut buf, "phase", &color::status(view.phase.as_str()));
    if view.debug {
        line(&mut buf, "debug", "on");
    }
    if let Some(build) = &view.last_build {
        line(&mut buf, "last build", &format_build(build));
    }
    if let Some(error) = &view.build_error {
        line(&mut buf, "build error", error);
    }
    if let Some(error) = &view.cancellation_error {
        line(&mut buf, "cancel error", error);
    }
    if let Some(message) = &view.cancellation_message {
        line(&mut buf, "canceled", message);
    }
    if let Some(missed) = &view.missed_parameters {
        line(
            &mut buf,
            &format!("missing parameters for {}", missed.template_version_id),
            &missed.names().join(", "),
        );
    }
    buf
}

pub fn format_workspace(workspace: &Workspace) -> String {
    let mut buf = String::new();
    let mut summary = workspace.to_string();
    if workspace.outdated {
        summary.push_str(" outdated");
    }
    line(&mut buf, "workspace", &color::header(&summary));
    line(&mut buf, "latest build", &format_build(&workspace.latest_build));
    buf
}

fn format_parameter(param: &TemplateVersionParameter) -> String {
    let mut text = param.name.clone();
    if !param.options.is_empty() {
        let values: Vec<&str> = param.options.iter().map(|o| o.value.as_str()).collect();
        text.push_str(&format!(" [{}]", values.join("|")));
    }
    if !param.mutable {
        text.push_str(&color::muted(" (immutable)"));
    }
    text
}

/// One parameter per line, or a note when nothing is missing.
pub fn format_missing(missed: &MissedParameters) -> String {
    if missed.parameters.is_empty() {
        return format!(
            "no missing parameters for {}\n",
            missed.template_version_id
        );
    }
    let mut buf = String::new();
    for param in &missed.parameters {
        buf.push_str(&format_parameter(param));
        buf.push('\n');
    }
    buf
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
