// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events racing an in-flight request

use super::*;
use std::sync::Arc;

#[tokio::test]
async fn stop_during_start_is_ignored() {
    let ctx = setup_after(BuildTransition::Stop, BuildStatus::Succeeded);
    ctx.gateway.hold();

    let (started, stopped) = tokio::join!(ctx.runtime.send(Event::start()), async {
        assert_eq!(ctx.phase(), Phase::RequestingStart);
        let accepted = ctx.runtime.send(Event::Stop).await;
        ctx.gateway.release();
        accepted
    });

    assert!(started);
    assert!(!stopped);
    assert_eq!(ctx.gateway.calls().len(), 1);
    assert_eq!(ctx.gateway.calls()[0].op(), GatewayOp::StartBuild);
    assert_eq!(ctx.phase(), Phase::Idle);
    assert_eq!(ctx.timeline.refreshes().len(), 1);
}

#[tokio::test]
async fn caller_settlement_cannot_end_an_in_flight_request() {
    let ctx = setup_after(BuildTransition::Stop, BuildStatus::Succeeded);
    ctx.gateway.hold();

    let (started, (injected, stopped)) = tokio::join!(ctx.runtime.send(Event::start()), async {
        let injected = ctx
            .runtime
            .send(Event::BuildSucceeded {
                build: build(BuildTransition::Start, BuildStatus::Pending),
            })
            .await;
        assert_eq!(ctx.phase(), Phase::RequestingStart);

        let stopped = ctx.runtime.send(Event::Stop).await;
        assert_eq!(ctx.gateway.calls().len(), 1);
        ctx.gateway.release();
        (injected, stopped)
    });

    assert!(started);
    assert!(!injected);
    assert!(!stopped);
    assert_eq!(ctx.gateway.calls_of(GatewayOp::StartBuild).len(), 1);
    assert!(ctx.gateway.calls_of(GatewayOp::StopBuild).is_empty());
    assert_eq!(ctx.phase(), Phase::Idle);
    assert_eq!(ctx.runtime.workspace().latest_build.id, "build-1");
    assert_eq!(ctx.timeline.refreshes().len(), 1);
}

#[yare::parameterized(
    build_failed    = { Event::BuildFailed { error: GatewayFailure::Message("x".into()) } },
    update_failed   = { Event::UpdateFailed { error: GatewayFailure::Message("x".into()) } },
    cancel_done     = { Event::CancelSucceeded { message: "done".into() } },
    activate_failed = { Event::ActivateFailed { error: GatewayFailure::Message("x".into()) } },
)]
fn settlements_are_not_accepted_from_callers(event: Event) {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async {
            let ctx = setup();
            assert!(!ctx.runtime.send(event).await);
            assert_eq!(ctx.phase(), Phase::Idle);
            assert!(ctx.gateway.calls().is_empty());
            assert!(ctx.notifier.calls().is_empty());
        });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn retry_after_update_routes_on_the_returned_build() {
    let TestContext {
        runtime, gateway, ..
    } = setup_after(BuildTransition::Stop, BuildStatus::Failed);
    let runtime = Arc::new(runtime);
    gateway.hold();

    let update = tokio::spawn({
        let runtime = Arc::clone(&runtime);
        async move { runtime.send(Event::update()).await }
    });
    while gateway.calls().is_empty() {
        tokio::task::yield_now().await;
    }

    // Keeps retrying until the update has settled and a retry gets through
    let retry = tokio::spawn({
        let runtime = Arc::clone(&runtime);
        async move {
            while !runtime.send(Event::RetryBuild).await {
                tokio::task::yield_now().await;
            }
        }
    });
    gateway.release();

    assert!(update.await.unwrap());
    retry.await.unwrap();

    let ops: Vec<_> = gateway.calls().iter().map(GatewayCall::op).collect();
    assert_eq!(ops, vec![GatewayOp::UpdateToLatest, GatewayOp::StartBuild]);
}

#[tokio::test]
async fn every_ui_event_is_ignored_while_requesting() {
    let ctx = setup_after(BuildTransition::Start, BuildStatus::Running);
    ctx.gateway.hold();

    let (_, ignored) = tokio::join!(ctx.runtime.send(Event::Cancel), async {
        let mut ignored = Vec::new();
        for event in [
            Event::start(),
            Event::Stop,
            Event::AskDelete,
            Event::Delete,
            Event::update(),
            Event::Cancel,
            Event::RetryBuild,
            Event::Activate,
        ] {
            ignored.push(!ctx.runtime.send(event).await);
        }
        ctx.gateway.release();
        ignored
    });

    assert!(ignored.iter().all(|i| *i));
    assert_eq!(ctx.gateway.calls().len(), 1);
    assert_eq!(ctx.notifier.calls().len(), 1);
}

#[tokio::test]
async fn stray_settlement_is_ignored_when_idle() {
    let ctx = setup();

    let accepted = ctx
        .runtime
        .send(Event::BuildSucceeded {
            build: build(BuildTransition::Stop, BuildStatus::Pending),
        })
        .await;

    assert!(!accepted);
    assert_eq!(ctx.runtime.view(), LifecycleState::new().view());
    assert!(ctx.timeline.refreshes().is_empty());
    // Ignored settlements leave the snapshot alone
    assert_eq!(
        ctx.runtime.workspace().latest_build.transition,
        BuildTransition::Start
    );
}
