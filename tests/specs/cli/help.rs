//! Help and version output specs

use crate::prelude::*;

#[test]
fn no_command_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: hatch")
        .stdout_has("session")
        .stdout_has("params")
        .stdout_has("scenario");
}

#[test]
fn version_flag() {
    cli().args(&["--version"]).passes().stdout_has("hatch 0.1.0");
}

#[test]
fn session_help_lists_options() {
    cli()
        .args(&["session", "--help"])
        .passes()
        .stdout_has("--scenario")
        .stdout_has("--notify");
}
