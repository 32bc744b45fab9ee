// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for one workspace's build lifecycle

use crate::executor::Executor;
use hatch_adapters::{BuildGateway, NotifyAdapter, TimelineSink};
use hatch_core::{Effect, Event, LifecycleState, LifecycleView, Workspace};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Runtime adapter dependencies
pub struct RuntimeDeps<G, N, T> {
    pub gateway: G,
    pub notifier: N,
    pub timeline: T,
}

/// Machine state and the workspace snapshot it decides against
struct Inner {
    state: LifecycleState,
    workspace: Workspace,
}

/// Drives the lifecycle machine of a single workspace view.
///
/// The lock is only held while the pure transition runs, never across a
/// gateway call. An event that arrives while a request is in flight finds
/// the machine in a requesting phase and is ignored.
pub struct Runtime<G, N, T> {
    executor: Executor<G, N, T>,
    inner: Mutex<Inner>,
}

impl<G, N, T> Runtime<G, N, T>
where
    G: BuildGateway,
    N: NotifyAdapter,
    T: TimelineSink,
{
    pub fn new(deps: RuntimeDeps<G, N, T>, workspace: Workspace) -> Self {
        Self {
            executor: Executor::new(deps),
            inner: Mutex::new(Inner {
                state: LifecycleState::new(),
                workspace,
            }),
        }
    }

    pub fn view(&self) -> LifecycleView {
        self.inner.lock().state.view()
    }

    /// Latest workspace snapshot known to this runtime
    pub fn workspace(&self) -> Workspace {
        self.inner.lock().workspace.clone()
    }

    /// Replace the workspace snapshot, e.g. after the caller refetched it
    pub fn set_workspace(&self, workspace: Workspace) {
        self.inner.lock().workspace = workspace;
    }

    /// Send a UI event and run it to quiescence.
    ///
    /// Effects are executed in order; settlement events they produce are fed
    /// back into the machine before this returns. Settlements only come from
    /// the executor, so one sent here is rejected. Returns whether the event
    /// was accepted by the current phase.
    pub async fn send(&self, event: Event) -> bool {
        if event.is_settlement() {
            tracing::warn!(event = %event.log_summary(), "settlement rejected");
            return false;
        }
        let Some(effects) = self.apply(&event) else {
            return false;
        };
        let mut queue = VecDeque::from(effects);

        while let Some(effect) = queue.pop_front() {
            // Failures are logged by the executor
            let Ok(Some(settlement)) = self.executor.execute(effect).await else {
                continue;
            };
            if let Some(effects) = self.apply(&settlement) {
                queue.extend(effects);
            }
        }

        true
    }

    /// Run one transition under the lock. `None` when the event was ignored.
    fn apply(&self, event: &Event) -> Option<Vec<Effect>> {
        let mut inner = self.inner.lock();
        let (next, effects) = inner.state.transition(&inner.workspace, event);

        if next == inner.state {
            tracing::debug!(event = %event.log_summary(), phase = %inner.state.phase, "ignored");
            return None;
        }

        tracing::info!(
            event = %event.log_summary(),
            from = %inner.state.phase,
            to = %next.phase,
            effects = effects.len(),
            "transition"
        );
        inner.state = next;
        absorb(&mut inner.workspace, event);
        Some(effects)
    }
}

/// Take the workspace and build returned by a settled request as the new snapshot
fn absorb(workspace: &mut Workspace, event: &Event) {
    match event {
        Event::BuildSucceeded { build } => workspace.latest_build = build.clone(),
        Event::UpdateSucceeded { build } => {
            workspace.latest_build = build.clone();
            workspace.outdated = false;
        }
        Event::ActivateSucceeded { workspace: updated } => {
            *workspace = (**updated).clone();
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "runtime_tests/mod.rs"]
mod tests;
