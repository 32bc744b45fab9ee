// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{build, workspace};
use crate::{BuildStatus, BuildTransition};

#[test]
fn unit_events_serialize_as_type_only() {
    let json = serde_json::to_string(&Event::RetryBuild).unwrap();
    assert_eq!(json, r#"{"type":"build:retry"}"#);

    let parsed: Event = serde_json::from_str(r#"{"type":"delete:ask"}"#).unwrap();
    assert_eq!(parsed, Event::AskDelete);
}

#[test]
fn start_without_parameters_omits_field() {
    let json = serde_json::to_string(&Event::start()).unwrap();
    assert_eq!(json, r#"{"type":"build:start"}"#);

    let parsed: Event = serde_json::from_str(
        r#"{"type":"build:update","parameters":[{"name":"region","value":"eu"}]}"#,
    )
    .unwrap();
    assert_eq!(
        parsed,
        Event::Update {
            parameters: Some(vec![BuildParameter::new("region", "eu")])
        }
    );
}

#[test]
fn name_matches_serde_tag() {
    let events = vec![
        Event::start(),
        Event::Stop,
        Event::Delete,
        Event::CancelDelete,
        Event::update(),
        Event::Cancel,
        Event::Activate,
        Event::BuildSucceeded {
            build: build(BuildTransition::Start, BuildStatus::Pending),
        },
        Event::CancelFailed {
            error: GatewayFailure::Message("nope".into()),
        },
        Event::ActivateSucceeded {
            workspace: Box::new(workspace(build(BuildTransition::Stop, BuildStatus::Succeeded))),
        },
    ];
    for event in events {
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
    }
}

#[yare::parameterized(
    start     = { Event::start(),                                           false },
    cancel    = { Event::Cancel,                                            false },
    succeeded = { Event::CancelSucceeded { message: "ok".into() },          true },
    failed    = { Event::UpdateFailed { error: GatewayFailure::Message("x".into()) }, true },
)]
fn settlement_classification(event: Event, expected: bool) {
    assert_eq!(event.is_settlement(), expected);
}

#[test]
fn log_summary_formats() {
    let b = build(BuildTransition::Delete, BuildStatus::Pending);
    assert_eq!(
        Event::BuildSucceeded { build: b }.log_summary(),
        "build:succeeded build=b-1 transition=delete status=pending"
    );
    assert_eq!(
        Event::Start {
            parameters: Some(vec![BuildParameter::new("a", "1")])
        }
        .log_summary(),
        "build:start parameters=1"
    );
    assert_eq!(
        Event::BuildFailed {
            error: GatewayFailure::Message("quota exceeded".into())
        }
        .log_summary(),
        "build:failed error=quota exceeded"
    );
    assert_eq!(Event::Stop.log_summary(), "build:stop");
}
