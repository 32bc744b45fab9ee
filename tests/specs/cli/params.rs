//! `hatch params` specs

use crate::prelude::*;

#[test]
fn sample_update_needs_size() {
    cli().args(&["params"]).passes().stdout_eq("size\n");
}

#[test]
fn supplied_values_satisfy_update() {
    cli()
        .args(&["params", "size=large"])
        .passes()
        .stdout_eq("no missing parameters for v2\n");
}

#[test]
fn value_outside_options_is_listed() {
    cli()
        .args(&["params", "region=mars", "size=large"])
        .passes()
        .stdout_eq("region [eu|us]\n");
}

#[test]
fn json_output() {
    let run = cli().args(&["-o", "json", "params"]).passes();
    let lines = run.json_lines();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["template_version_id"], "v2");
    assert_eq!(lines[0]["parameters"][0]["name"], "size");
    assert_eq!(lines[0]["parameters"][0]["required"], true);
}

#[test]
fn scenario_from_environment() {
    let project = Project::empty();
    let path = project.file("min.toml", MINIMAL_SCENARIO);

    cli()
        .args(&["params"])
        .env("HATCH_SCENARIO", &path)
        .passes()
        .stdout_eq("no missing parameters for v1\n");
}

#[test]
fn malformed_assignment_fails() {
    cli()
        .args(&["params", "size"])
        .fails()
        .stderr_has("expected name=value, got 'size'");
}
