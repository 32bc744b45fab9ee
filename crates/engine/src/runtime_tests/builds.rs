// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Start, stop, delete, and retry through the runtime

use super::*;

#[tokio::test]
async fn start_settles_to_idle_and_refreshes_once() {
    let ctx = setup_after(BuildTransition::Stop, BuildStatus::Succeeded);

    assert!(ctx.runtime.send(Event::start()).await);

    assert_eq!(ctx.phase(), Phase::Idle);
    assert_eq!(ctx.gateway.calls_of(GatewayOp::StartBuild).len(), 1);
    assert_eq!(ctx.timeline.refreshes(), vec![ws_id()]);

    let latest = ctx.runtime.workspace().latest_build;
    assert_eq!(latest.id, "build-1");
    assert_eq!(latest.transition, BuildTransition::Start);
    assert_eq!(ctx.runtime.view().last_build, Some(latest));
}

#[tokio::test]
async fn start_uses_latest_build_template_version() {
    let ctx = setup_after(BuildTransition::Stop, BuildStatus::Succeeded);

    ctx.runtime.send(Event::start()).await;

    let calls = ctx.gateway.calls();
    let GatewayCall::StartBuild {
        template_version_id,
        log_level,
        ..
    } = &calls[0]
    else {
        panic!("expected start_build, got {:?}", calls[0]);
    };
    assert_eq!(template_version_id, "v1");
    assert_eq!(*log_level, None);
}

#[tokio::test]
async fn failed_stop_records_build_error_without_refresh() {
    let ctx = setup();
    ctx.gateway.fail_next(
        GatewayOp::StopBuild,
        GatewayFailure::api(409, "A workspace build is already active."),
    );

    assert!(ctx.runtime.send(Event::Stop).await);

    let view = ctx.runtime.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(
        view.build_error.as_deref(),
        Some("A workspace build is already active.")
    );
    assert!(ctx.timeline.refreshes().is_empty());
    // Snapshot untouched on failure
    assert_eq!(ctx.runtime.workspace().latest_build.id, "b-1");
}

#[tokio::test]
async fn delete_goes_through_confirmation() {
    let ctx = setup_after(BuildTransition::Stop, BuildStatus::Succeeded);

    assert!(ctx.runtime.send(Event::AskDelete).await);
    assert_eq!(ctx.phase(), Phase::AskingDelete);
    assert!(ctx.gateway.calls().is_empty());

    assert!(ctx.runtime.send(Event::Delete).await);
    assert_eq!(ctx.phase(), Phase::Idle);
    assert_eq!(
        ctx.gateway.calls(),
        vec![GatewayCall::DeleteBuild {
            workspace_id: ws_id(),
            log_level: None,
        }]
    );
    assert_eq!(ctx.timeline.refreshes().len(), 1);
}

#[tokio::test]
async fn dismissed_delete_makes_no_call() {
    let ctx = setup();

    ctx.runtime.send(Event::AskDelete).await;
    assert!(ctx.runtime.send(Event::CancelDelete).await);

    assert_eq!(ctx.phase(), Phase::Idle);
    assert!(ctx.gateway.calls().is_empty());
}

#[yare::parameterized(
    start  = { BuildTransition::Start,  GatewayOp::StartBuild },
    stop   = { BuildTransition::Stop,   GatewayOp::StopBuild },
    delete = { BuildTransition::Delete, GatewayOp::DeleteBuild },
)]
fn retry_reissues_transition_with_debug(transition: BuildTransition, op: GatewayOp) {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async {
            let ctx = setup_after(transition, BuildStatus::Failed);

            assert!(ctx.runtime.send(Event::RetryBuild).await);

            let calls = ctx.gateway.calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].op(), op);
            assert_eq!(calls[0].log_level(), Some(LogLevel::Debug));
            assert!(!ctx.runtime.view().debug);
        });
}

#[tokio::test]
async fn retry_after_failed_start_clears_error() {
    let ctx = setup_after(BuildTransition::Start, BuildStatus::Failed);
    ctx.gateway
        .fail_next(GatewayOp::StartBuild, GatewayFailure::Message("boom".into()));

    ctx.runtime.send(Event::start()).await;
    assert_eq!(ctx.runtime.view().build_error.as_deref(), Some("boom"));

    assert!(ctx.runtime.send(Event::RetryBuild).await);

    let view = ctx.runtime.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.build_error, None);
    let calls = ctx.gateway.calls_of(GatewayOp::StartBuild);
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].log_level(), Some(LogLevel::Debug));
}

#[tokio::test]
async fn debug_applies_to_retry_only() {
    let ctx = setup_after(BuildTransition::Start, BuildStatus::Failed);
    ctx.gateway
        .fail_next(GatewayOp::StartBuild, GatewayFailure::Message("again".into()));

    // Retry fails; the flag must not leak into the next plain start
    ctx.runtime.send(Event::RetryBuild).await;
    assert!(!ctx.runtime.view().debug);

    ctx.runtime.send(Event::start()).await;

    let levels: Vec<_> = ctx
        .gateway
        .calls_of(GatewayOp::StartBuild)
        .iter()
        .map(GatewayCall::log_level)
        .collect();
    assert_eq!(levels, vec![Some(LogLevel::Debug), None]);
}

#[tokio::test]
async fn set_workspace_replaces_snapshot() {
    let ctx = setup();
    let stopped = workspace(build(BuildTransition::Stop, BuildStatus::Failed));

    ctx.runtime.set_workspace(stopped.clone());
    assert_eq!(ctx.runtime.workspace(), stopped);

    ctx.runtime.send(Event::RetryBuild).await;
    assert_eq!(ctx.gateway.calls()[0].op(), GatewayOp::StopBuild);
}
