// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cancel and activate through the runtime

use super::*;
use hatch_core::BuildId;

#[tokio::test]
async fn cancel_targets_latest_build_and_notifies() {
    let ctx = setup_after(BuildTransition::Start, BuildStatus::Running);

    assert!(ctx.runtime.send(Event::Cancel).await);

    assert_eq!(
        ctx.gateway.calls(),
        vec![GatewayCall::CancelBuild {
            build_id: BuildId::new("b-1")
        }]
    );
    let view = ctx.runtime.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(
        view.cancellation_message.as_deref(),
        Some("Job has been marked as canceled...")
    );

    let notes = ctx.notifier.calls();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Build canceled");
    assert_eq!(notes[0].message, "Job has been marked as canceled...");
    // Cancel is not a build; the timeline is left alone
    assert!(ctx.timeline.refreshes().is_empty());
}

#[tokio::test]
async fn refused_cancel_records_cancellation_error() {
    let ctx = setup_after(BuildTransition::Start, BuildStatus::Succeeded);
    ctx.gateway.fail_next(
        GatewayOp::CancelBuild,
        GatewayFailure::api(412, "Job has already completed!"),
    );

    assert!(ctx.runtime.send(Event::Cancel).await);

    let view = ctx.runtime.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(
        view.cancellation_error.as_deref(),
        Some("Job has already completed!")
    );
    assert_eq!(view.build_error, None);
    assert!(ctx.notifier.calls().is_empty());
}

#[tokio::test]
async fn new_cancel_clears_previous_outcome() {
    let ctx = setup_after(BuildTransition::Start, BuildStatus::Running);
    ctx.gateway.fail_next(
        GatewayOp::CancelBuild,
        GatewayFailure::Message("try later".into()),
    );

    ctx.runtime.send(Event::Cancel).await;
    assert!(ctx.runtime.view().cancellation_error.is_some());

    ctx.runtime.send(Event::Cancel).await;

    let view = ctx.runtime.view();
    assert_eq!(view.cancellation_error, None);
    assert!(view.cancellation_message.is_some());
}

#[tokio::test]
async fn failed_cancel_notification_does_not_escape() {
    let ctx = setup_after(BuildTransition::Start, BuildStatus::Running);
    ctx.notifier.set_unavailable("no display");

    assert!(ctx.runtime.send(Event::Cancel).await);

    assert_eq!(ctx.phase(), Phase::Idle);
    assert!(ctx.runtime.view().cancellation_message.is_some());
}

#[tokio::test]
async fn activate_replaces_snapshot_with_returned_workspace() {
    let mut dormant = workspace(build(BuildTransition::Stop, BuildStatus::Succeeded));
    dormant.dormant = true;
    dormant.dormant_at_ms = Some(1_000);
    let ctx = setup_with(dormant);

    assert!(ctx.runtime.send(Event::Activate).await);

    assert_eq!(
        ctx.gateway.calls(),
        vec![GatewayCall::SetDormant {
            workspace_id: ws_id(),
            dormant: false,
        }]
    );
    assert_eq!(ctx.phase(), Phase::Idle);
    assert!(!ctx.runtime.workspace().dormant);
    assert!(ctx.notifier.calls().is_empty());
    assert!(ctx.timeline.refreshes().is_empty());
}

#[tokio::test]
async fn failed_activate_notifies_with_reason() {
    let ctx = setup();
    ctx.gateway.fail_next(
        GatewayOp::SetDormant,
        GatewayFailure::api(403, "Insufficient permissions."),
    );

    assert!(ctx.runtime.send(Event::Activate).await);

    let notes = ctx.notifier.calls();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Activation failed");
    assert_eq!(notes[0].message, "Insufficient permissions.");
    assert_eq!(ctx.phase(), Phase::Idle);
    // Activation failures only surface as notifications
    assert_eq!(ctx.runtime.view().build_error, None);
}
