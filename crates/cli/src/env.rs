// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

// --- Logging ---

/// Log filter directives (`tracing_subscriber::EnvFilter` syntax)
pub fn log_filter() -> Option<String> {
    std::env::var("HATCH_LOG").ok().filter(|s| !s.is_empty())
}

/// Write logs to this file instead of stderr
pub fn log_path() -> Option<PathBuf> {
    std::env::var("HATCH_LOG_PATH")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// --- Scenario ---

/// Scenario file used when `--scenario` is not given
pub fn scenario_path() -> Option<PathBuf> {
    std::env::var("HATCH_SCENARIO")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}
