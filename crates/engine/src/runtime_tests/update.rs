// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Update to the active template version

use super::*;
use hatch_adapters::{InMemoryGateway, TemplateVersion};
use hatch_core::{BuildParameter, MissedParameters};

#[tokio::test]
async fn update_settles_and_clears_outdated() {
    let mut stale = workspace(build(BuildTransition::Start, BuildStatus::Succeeded));
    stale.outdated = true;
    let ctx = setup_with(stale);

    assert!(ctx.runtime.send(Event::update()).await);

    assert_eq!(ctx.phase(), Phase::Idle);
    let snapshot = ctx.runtime.workspace();
    assert!(!snapshot.outdated);
    assert_eq!(snapshot.latest_build.id, "build-1");
    assert_eq!(ctx.timeline.refreshes(), vec![ws_id()]);
}

#[tokio::test]
async fn missing_parameters_round_trip() {
    let ctx = setup();
    ctx.gateway.fail_next(
        GatewayOp::UpdateToLatest,
        GatewayFailure::MissingParameters {
            parameters: vec![param("region", true, true)],
            template_version_id: "v2".into(),
        },
    );

    assert!(ctx.runtime.send(Event::update()).await);

    let view = ctx.runtime.view();
    assert_eq!(view.phase, Phase::AwaitingMissingParameters);
    assert_eq!(
        view.missed_parameters,
        Some(MissedParameters {
            template_version_id: "v2".into(),
            parameters: vec![param("region", true, true)],
        })
    );
    assert_eq!(view.build_error, None);
    assert!(ctx.timeline.refreshes().is_empty());

    let answers = vec![BuildParameter::new("region", "eu")];
    assert!(
        ctx.runtime
            .send(Event::Update {
                parameters: Some(answers.clone()),
            })
            .await
    );

    let view = ctx.runtime.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.missed_parameters, None);
    assert_eq!(
        ctx.gateway.calls_of(GatewayOp::UpdateToLatest)[1],
        GatewayCall::UpdateToLatest {
            workspace_id: ws_id(),
            parameters: Some(answers),
        }
    );
    assert_eq!(ctx.timeline.refreshes().len(), 1);
}

#[tokio::test]
async fn dismissing_parameter_prompt_returns_to_idle() {
    let ctx = setup();
    ctx.gateway.fail_next(
        GatewayOp::UpdateToLatest,
        GatewayFailure::MissingParameters {
            parameters: vec![param("region", true, true)],
            template_version_id: "v2".into(),
        },
    );
    ctx.runtime.send(Event::update()).await;

    assert!(ctx.runtime.send(Event::Cancel).await);

    let view = ctx.runtime.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.missed_parameters, None);
    // Dismissing the prompt is not a build cancel
    assert!(ctx.gateway.calls_of(GatewayOp::CancelBuild).is_empty());
}

#[tokio::test]
async fn other_update_failures_become_build_error() {
    let ctx = setup();
    ctx.gateway.fail_next(
        GatewayOp::UpdateToLatest,
        GatewayFailure::Transport("connection reset".into()),
    );

    ctx.runtime.send(Event::update()).await;

    let view = ctx.runtime.view();
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(
        view.build_error.as_deref(),
        Some(hatch_core::DEFAULT_BUILD_ERROR)
    );
}

#[tokio::test]
async fn update_against_in_memory_backend() {
    let current = workspace(build(BuildTransition::Start, BuildStatus::Succeeded));
    let gateway = InMemoryGateway::new(current.clone())
        .with_version(TemplateVersion::new("v2").with_parameter(param("region", true, true)))
        .with_active_version("v2");
    let notifier = FakeNotifyAdapter::new();
    let timeline = FakeTimelineSink::new();
    let runtime = Runtime::new(
        RuntimeDeps {
            gateway: gateway.clone(),
            notifier,
            timeline: timeline.clone(),
        },
        gateway.workspace(),
    );
    assert!(runtime.workspace().outdated);

    runtime.send(Event::update()).await;
    assert_eq!(runtime.view().phase, Phase::AwaitingMissingParameters);
    assert_eq!(
        runtime.view().missed_parameters.map(|m| m.template_version_id),
        Some("v2".into())
    );

    runtime
        .send(Event::Update {
            parameters: Some(vec![BuildParameter::new("region", "eu")]),
        })
        .await;

    let snapshot = runtime.workspace();
    assert_eq!(runtime.view().phase, Phase::Idle);
    assert_eq!(snapshot.latest_build.template_version_id, "v2");
    assert!(!snapshot.outdated);
    assert_eq!(gateway.parameters(), vec![BuildParameter::new("region", "eu")]);
    assert_eq!(timeline.refreshes().len(), 1);
}
