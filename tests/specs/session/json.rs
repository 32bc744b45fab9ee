//! Session output in JSON

use crate::prelude::*;

#[test]
fn one_object_per_line() {
    let run = cli()
        .args(&["-o", "json", "session"])
        .stdin("start\nstop\nask-delete\nstart\n")
        .passes();
    let lines = run.json_lines();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0]["timeline_refreshed"], "ws-1");

    assert_eq!(lines[1]["event"], "build:start");
    assert_eq!(lines[1]["accepted"], true);
    assert_eq!(lines[1]["view"]["last_build"]["build_number"], 2);

    assert_eq!(lines[2]["event"], "build:stop");
    assert_eq!(
        lines[2]["view"]["build_error"],
        "A workspace build is already active."
    );

    assert_eq!(lines[3]["view"]["phase"], "asking_delete");

    assert_eq!(lines[4]["event"], "build:start");
    assert_eq!(lines[4]["accepted"], false);
    assert_eq!(lines[4]["phase"], "asking_delete");
}

#[test]
fn retry_requests_debug_logs() {
    let project = Project::empty();
    let path = project.file(
        "failed.toml",
        &MINIMAL_SCENARIO.replace("status = \"succeeded\"", "status = \"failed\""),
    );

    let run = cli()
        .args(&["-o", "json", "session", "--scenario", path.to_str().unwrap()])
        .stdin("retry\nstart\n")
        .passes();
    let lines = run.json_lines();

    assert_eq!(lines[1]["view"]["last_build"]["transition"], "stop");
    assert_eq!(lines[1]["view"]["last_build"]["log_level"], "debug");
    assert_eq!(lines[1]["view"]["debug"], false);
}

#[test]
fn status_includes_workspace_and_view() {
    let run = cli()
        .args(&["-o", "json", "session"])
        .stdin("status\n")
        .passes();
    let lines = run.json_lines();

    assert_eq!(lines[0]["workspace"]["id"], "ws-1");
    assert_eq!(lines[0]["workspace"]["outdated"], true);
    assert_eq!(lines[0]["view"]["phase"], "idle");
}

#[test]
fn notifications_are_json_too() {
    let run = cli()
        .args(&["-o", "json", "session"])
        .stdin("start\ncancel\n")
        .passes();
    let lines = run.json_lines();

    assert_eq!(lines[2]["notification"]["title"], "Build canceled");
    assert_eq!(
        lines[3]["view"]["cancellation_message"],
        "Job has been marked as canceled..."
    );
}
