// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry routing based on the direction of the previous build.

use crate::build::{Build, BuildTransition};

pub fn was_starting(build: &Build) -> bool {
    build.transition == BuildTransition::Start
}

pub fn was_stopping(build: &Build) -> bool {
    build.transition == BuildTransition::Stop
}

pub fn was_deleting(build: &Build) -> bool {
    build.transition == BuildTransition::Delete
}

/// Pick the transition a bare retry should re-issue.
///
/// Guards are consulted in start, stop, delete order; exactly one holds for
/// any build.
pub fn retry_transition(build: &Build) -> BuildTransition {
    if was_starting(build) {
        BuildTransition::Start
    } else if was_stopping(build) {
        BuildTransition::Stop
    } else {
        debug_assert!(was_deleting(build));
        BuildTransition::Delete
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
