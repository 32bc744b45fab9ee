// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hatch session` - drive one workspace's build lifecycle from stdin

use anyhow::Result;
use clap::Args;
use hatch_adapters::{ChannelTimelineSink, InMemoryGateway, TracedGateway};
use hatch_core::{parse_assignments, BuildParameter, BuildStatus, Event, WorkspaceId};
use hatch_engine::{Runtime, RuntimeDeps};
use serde_json::json;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::notify::{NotifyTarget, SessionNotifier};
use crate::output::{self, OutputFormat};
use crate::scenario::Scenario;

#[derive(Args)]
pub struct SessionArgs {
    /// Scenario file (default: $HATCH_SCENARIO, then the built-in sample)
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Where build notifications go
    #[arg(long, value_enum, default_value_t)]
    pub notify: NotifyTarget,
}

/// One line of session input
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Send(Event),
    /// Simulate the provisioner finishing the latest build
    Complete(BuildStatus),
    Status,
}

/// Parse a line of input. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let no_args = |event: Event| {
        if args.is_empty() {
            Ok(SessionCommand::Send(event))
        } else {
            Err(format!("{name} takes no arguments"))
        }
    };

    let command = match name {
        "start" => SessionCommand::Send(Event::Start {
            parameters: assignments(&args)?,
        }),
        "update" => SessionCommand::Send(Event::Update {
            parameters: assignments(&args)?,
        }),
        "stop" => no_args(Event::Stop)?,
        "ask-delete" => no_args(Event::AskDelete)?,
        "delete" => no_args(Event::Delete)?,
        "cancel-delete" => no_args(Event::CancelDelete)?,
        "cancel" => no_args(Event::Cancel)?,
        "retry" => no_args(Event::RetryBuild)?,
        "activate" => no_args(Event::Activate)?,
        "complete" => match args.as_slice() {
            [status] => SessionCommand::Complete(status.parse()?),
            _ => return Err("usage: complete <status>".to_string()),
        },
        "status" if args.is_empty() => SessionCommand::Status,
        "status" => return Err("status takes no arguments".to_string()),
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

fn assignments(args: &[&str]) -> Result<Option<Vec<BuildParameter>>, String> {
    if args.is_empty() {
        return Ok(None);
    }
    parse_assignments(args.iter().copied()).map(Some)
}

type SessionRuntime = Runtime<TracedGateway<InMemoryGateway>, SessionNotifier, ChannelTimelineSink>;

/// A runtime wired to the simulated backend.
///
/// Timeline refreshes stand in for the cache invalidation a real view would
/// see: each one is reported and the workspace is refetched from the backend.
pub struct Session {
    runtime: SessionRuntime,
    backend: InMemoryGateway,
    refreshes: UnboundedReceiver<WorkspaceId>,
    format: OutputFormat,
}

impl Session {
    pub fn new(backend: InMemoryGateway, notifier: SessionNotifier, format: OutputFormat) -> Self {
        let (timeline, refreshes) = ChannelTimelineSink::new();
        let runtime = Runtime::new(
            RuntimeDeps {
                gateway: TracedGateway::new(backend.clone()),
                notifier,
                timeline,
            },
            backend.workspace(),
        );
        Self {
            runtime,
            backend,
            refreshes,
            format,
        }
    }

    /// Run a command and render what the view would show afterwards.
    pub async fn handle(&mut self, command: SessionCommand) -> Result<String> {
        match command {
            SessionCommand::Send(event) => self.send(event).await,
            SessionCommand::Complete(status) => {
                self.backend.complete_latest(status);
                self.refetch();
                self.render_workspace(false)
            }
            SessionCommand::Status => {
                self.refetch();
                self.render_workspace(true)
            }
        }
    }

    async fn send(&mut self, event: Event) -> Result<String> {
        let name = event.name();
        let accepted = self.runtime.send(event).await;

        let mut out = String::new();
        while let Ok(workspace_id) = self.refreshes.try_recv() {
            self.refetch();
            out.push_str(&self.render(
                || format!("timeline refreshed: {workspace_id}"),
                || json!({ "timeline_refreshed": workspace_id }),
            )?);
        }

        let view = self.runtime.view();
        let rendered = if accepted {
            match self.format {
                OutputFormat::Text => output::format_view(&view),
                OutputFormat::Json => json_line(&json!({
                    "event": name,
                    "accepted": true,
                    "view": view,
                }))?,
            }
        } else {
            self.render(
                || "ignored".to_string(),
                || json!({ "event": name, "accepted": false, "phase": view.phase }),
            )?
        };
        out.push_str(&rendered);
        Ok(out)
    }

    fn refetch(&self) {
        self.runtime.set_workspace(self.backend.workspace());
    }

    fn render_workspace(&self, with_view: bool) -> Result<String> {
        let workspace = self.runtime.workspace();
        let view = self.runtime.view();
        match self.format {
            OutputFormat::Text => {
                let mut out = output::format_workspace(&workspace);
                if with_view {
                    out.push_str(&output::format_view(&view));
                }
                Ok(out)
            }
            OutputFormat::Json if with_view => {
                json_line(&json!({ "workspace": workspace, "view": view }))
            }
            OutputFormat::Json => json_line(&json!({ "workspace": workspace })),
        }
    }

    /// A single-line message in the session's format
    fn render(
        &self,
        text: impl FnOnce() -> String,
        value: impl FnOnce() -> serde_json::Value,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(format!("{}\n", text())),
            OutputFormat::Json => json_line(&value()),
        }
    }
}

fn json_line(value: &serde_json::Value) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string(value)?))
}

pub async fn handle(args: SessionArgs, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::load(super::scenario_path(args.scenario).as_deref())?;
    let backend = scenario.gateway()?;
    let mut session = Session::new(backend, SessionNotifier::new(args.notify, format), format);
    tracing::info!(workspace = %scenario.workspace.id, "session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Some(command)) => print!("{}", session.handle(command).await?),
            Ok(None) => {}
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
