// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime tests

mod builds;
mod cancel;
mod concurrency;
mod update;

use super::*;
use hatch_adapters::{
    FakeBuildGateway, FakeNotifyAdapter, FakeTimelineSink, GatewayCall, GatewayOp,
};
use hatch_core::test_support::{build, param, workspace};
use hatch_core::{BuildStatus, BuildTransition, GatewayFailure, LogLevel, Phase, WorkspaceId};

type TestRuntime = Runtime<FakeBuildGateway, FakeNotifyAdapter, FakeTimelineSink>;

/// Test context holding the runtime and its fake adapters
struct TestContext {
    runtime: TestRuntime,
    gateway: FakeBuildGateway,
    notifier: FakeNotifyAdapter,
    timeline: FakeTimelineSink,
}

fn setup() -> TestContext {
    setup_with(workspace(build(
        BuildTransition::Start,
        BuildStatus::Succeeded,
    )))
}

fn setup_with(workspace: Workspace) -> TestContext {
    let gateway = FakeBuildGateway::new().with_workspace(workspace.clone());
    let notifier = FakeNotifyAdapter::new();
    let timeline = FakeTimelineSink::new();

    let runtime = Runtime::new(
        RuntimeDeps {
            gateway: gateway.clone(),
            notifier: notifier.clone(),
            timeline: timeline.clone(),
        },
        workspace,
    );

    TestContext {
        runtime,
        gateway,
        notifier,
        timeline,
    }
}

/// Workspace whose latest build ended with `status` after `transition`
fn setup_after(transition: BuildTransition, status: BuildStatus) -> TestContext {
    setup_with(workspace(build(transition, status)))
}

fn ws_id() -> WorkspaceId {
    WorkspaceId::new("ws-1")
}

impl TestContext {
    fn phase(&self) -> Phase {
        self.runtime.view().phase
    }
}
