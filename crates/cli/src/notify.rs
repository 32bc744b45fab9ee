// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification targets selectable with `--notify`.

use async_trait::async_trait;
use clap::ValueEnum;
use hatch_adapters::{DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, NotifyError};

use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum NotifyTarget {
    /// Print notifications alongside session output
    #[default]
    Console,
    /// Desktop notifications
    Desktop,
    None,
}

/// Prints notifications to stdout in the session's output format
#[derive(Clone, Copy, Debug)]
pub struct ConsoleNotifyAdapter {
    format: OutputFormat,
}

impl ConsoleNotifyAdapter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn render(&self, title: &str, message: &str) -> Result<String, NotifyError> {
        match self.format {
            OutputFormat::Text => Ok(format!("notification: {title}: {message}")),
            OutputFormat::Json => serde_json::to_string(&serde_json::json!({
                "notification": { "title": title, "message": message },
            }))
            .map_err(|e| NotifyError::Render(e.to_string())),
        }
    }
}

#[async_trait]
impl NotifyAdapter for ConsoleNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        println!("{}", self.render(title, message)?);
        Ok(())
    }
}

/// The notifier a session runs with
#[derive(Clone)]
pub enum SessionNotifier {
    Console(ConsoleNotifyAdapter),
    Desktop(DesktopNotifyAdapter),
    None(NoOpNotifyAdapter),
}

impl SessionNotifier {
    pub fn new(target: NotifyTarget, format: OutputFormat) -> Self {
        match target {
            NotifyTarget::Console => Self::Console(ConsoleNotifyAdapter::new(format)),
            NotifyTarget::Desktop => Self::Desktop(DesktopNotifyAdapter::new()),
            NotifyTarget::None => Self::None(NoOpNotifyAdapter),
        }
    }
}

#[async_trait]
impl NotifyAdapter for SessionNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        match self {
            Self::Console(adapter) => adapter.notify(title, message).await,
            Self::Desktop(adapter) => adapter.notify(title, message).await,
            Self::None(adapter) => adapter.notify(title, message).await,
        }
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
