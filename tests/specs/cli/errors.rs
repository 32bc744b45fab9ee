//! CLI error handling specs

use crate::prelude::*;

#[test]
fn missing_scenario_file_fails() {
    cli()
        .args(&["session", "--scenario", "/nonexistent/hatch.toml"])
        .fails()
        .stderr_has("Error: failed to read scenario /nonexistent/hatch.toml");
}

#[test]
fn invalid_scenario_fails() {
    let project = Project::empty();
    let path = project.file("bad.toml", "surprise = 1\n");

    let run = cli()
        .args(&["params", "--scenario", path.to_str().unwrap()])
        .fails()
        .stderr_has("invalid scenario");
    assert_eq!(run.code(), Some(1));
}

#[test]
fn unknown_fault_operation_fails() {
    let project = Project::empty();
    let content = format!("{MINIMAL_SCENARIO}\n[[faults]]\nop = \"explode\"\n");
    let path = project.file("faults.toml", &content);

    cli()
        .args(&["session", "--scenario", path.to_str().unwrap()])
        .fails()
        .stderr_has("invalid fault: unknown gateway operation: explode");
}

#[test]
fn bad_session_lines_are_reported_and_skipped() {
    cli()
        .args(&["session"])
        .stdin("launch\nstop now\ncomplete\n")
        .passes()
        .stdout_eq("")
        .stderr_eq(
            "error: unknown command: launch\n\
             error: stop takes no arguments\n\
             error: usage: complete <status>\n",
        );
}

#[test]
fn unknown_output_format_fails() {
    cli()
        .args(&["-o", "yaml", "params"])
        .fails()
        .stderr_has("invalid value 'yaml'");
}
