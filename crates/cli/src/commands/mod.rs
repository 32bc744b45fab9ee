// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod params;
pub mod scenario;
pub mod session;

use std::path::PathBuf;

/// `--scenario` wins over `HATCH_SCENARIO`; neither means the built-in sample.
pub fn scenario_path(arg: Option<PathBuf>) -> Option<PathBuf> {
    arg.or_else(crate::env::scenario_path)
}
