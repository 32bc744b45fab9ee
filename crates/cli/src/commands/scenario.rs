// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hatch scenario` - print the sample scenario

use anyhow::Result;

use crate::output::OutputFormat;
use crate::scenario::{Scenario, SAMPLE};

pub fn handle(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{SAMPLE}"),
        OutputFormat::Json => {
            let scenario = Scenario::load(None)?;
            println!("{}", serde_json::to_string_pretty(&scenario)?);
        }
    }
    Ok(())
}
