//! Updating to the active template version

use crate::prelude::*;

#[test]
fn missing_parameters_round_trip() {
    cli()
        .args(&["session"])
        .stdin("update\ncancel\nupdate size=large\nstatus\n")
        .passes()
        .stdout_eq(
            "\
phase: awaiting_missing_parameters
missing parameters for v2: size
phase: idle
timeline refreshed: ws-1
phase: idle
last build: #2 start pending (v2)
workspace: dev (ws-1, start pending)
latest build: #2 start pending (v2)
phase: idle
last build: #2 start pending (v2)
",
        );
}

#[test]
fn answering_the_prompt_directly() {
    cli()
        .args(&["session"])
        .stdin("update\nupdate size=small\n")
        .passes()
        .stdout_has("missing parameters for v2: size\n")
        .stdout_has("last build: #2 start pending (v2)\n");
}

#[test]
fn invalid_option_value_is_asked_again() {
    cli()
        .args(&["session"])
        .stdin("update region=mars size=large\n")
        .passes()
        .stdout_eq(
            "\
phase: awaiting_missing_parameters
missing parameters for v2: region
",
        );
}
