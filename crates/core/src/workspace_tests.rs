// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{build, workspace};
use crate::{BuildStatus, BuildTransition};

#[test]
fn display_includes_latest_build_and_dormancy() {
    let mut ws = workspace(build(BuildTransition::Stop, BuildStatus::Succeeded));
    assert_eq!(ws.to_string(), "dev (ws-1, stop succeeded)");

    ws.dormant = true;
    assert_eq!(ws.to_string(), "dev (ws-1, stop succeeded) dormant");
}

#[test]
fn optional_fields_default_when_missing() {
    let json = r#"{
        "id": "ws-9",
        "name": "scratch",
        "template_id": "tpl",
        "latest_build": {
            "id": "b-1",
            "transition": "start",
            "status": "running",
            "template_version_id": "v1"
        }
    }"#;
    let ws: Workspace = serde_json::from_str(json).unwrap();
    assert!(!ws.dormant);
    assert!(!ws.outdated);
    assert_eq!(ws.dormant_at_ms, None);
}
