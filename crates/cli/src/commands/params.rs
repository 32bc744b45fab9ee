// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hatch params` - parameters an update would still need

use anyhow::Result;
use clap::Args;
use hatch_core::{parse_assignments, MissedParameters};
use std::path::PathBuf;

use crate::output::{self, OutputFormat};
use crate::scenario::Scenario;

#[derive(Args)]
pub struct ParamsArgs {
    /// Scenario file (default: $HATCH_SCENARIO, then the built-in sample)
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Values to submit with the update, as name=value
    pub values: Vec<String>,
}

pub fn handle(args: ParamsArgs, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::load(super::scenario_path(args.scenario).as_deref())?;
    let missed = missing(&scenario, &args.values)?;

    match format {
        OutputFormat::Text => print!("{}", output::format_missing(&missed)),
        OutputFormat::Json => output::print_json(&missed)?,
    }
    Ok(())
}

fn missing(scenario: &Scenario, values: &[String]) -> Result<MissedParameters> {
    let values = parse_assignments(values.iter().map(String::as_str)).map_err(anyhow::Error::msg)?;
    let backend = scenario.gateway()?;
    Ok(MissedParameters {
        template_version_id: backend.active_version(),
        parameters: backend.missing_for_update(&values),
    })
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
