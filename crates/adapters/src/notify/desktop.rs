// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notices through notify-rust.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use notify_rust::Notification;

/// Shows notices with the platform's notification service
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        // mac-notification-sys otherwise resolves a bundle id through an
        // AppleScript that can hang without Automation permission
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

fn show(title: &str, message: &str) -> Result<(), NotifyError> {
    Notification::new()
        .appname("hatch")
        .summary(title)
        .body(message)
        .show()
        .map(drop)
        .map_err(|e| NotifyError::Unavailable(e.to_string()))
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let (title, message) = (title.to_owned(), message.to_owned());
        // show() blocks on the notification service
        tokio::task::spawn_blocking(move || show(&title, &message))
            .await
            .map_err(|e| NotifyError::Unavailable(e.to_string()))??;
        tracing::debug!("desktop notice shown");
        Ok(())
    }
}
