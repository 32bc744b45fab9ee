// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    pending   = { BuildStatus::Pending,   true,  false },
    running   = { BuildStatus::Running,   true,  false },
    succeeded = { BuildStatus::Succeeded, false, true },
    failed    = { BuildStatus::Failed,    false, true },
    canceling = { BuildStatus::Canceling, true,  false },
    canceled  = { BuildStatus::Canceled,  false, true },
)]
fn status_activity(status: BuildStatus, active: bool, terminal: bool) {
    assert_eq!(status.is_active(), active);
    assert_eq!(status.is_terminal(), terminal);
    assert_eq!(status.to_string().parse::<BuildStatus>(), Ok(status));
}

#[test]
fn unknown_status_is_rejected() {
    assert!("exploded".parse::<BuildStatus>().is_err());
}

#[test]
fn build_deserializes_from_backend_shape() {
    let json = r#"{
        "id": "b-1",
        "transition": "delete",
        "status": "failed",
        "template_version_id": "v1",
        "error": "terraform exited 1"
    }"#;
    let build: Build = serde_json::from_str(json).unwrap();
    assert_eq!(build.id, "b-1");
    assert_eq!(build.build_number, 0);
    assert_eq!(build.transition, BuildTransition::Delete);
    assert_eq!(build.status, BuildStatus::Failed);
    assert!(!build.is_active());
    assert_eq!(build.log_level, None);
    assert_eq!(build.error.as_deref(), Some("terraform exited 1"));
}

#[test]
fn log_level_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&LogLevel::Debug).unwrap(), "\"debug\"");
    assert_eq!(LogLevel::Debug.to_string(), "debug");
}
