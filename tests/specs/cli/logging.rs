//! Logging configuration specs

use crate::prelude::*;

#[test]
fn logs_go_to_stderr_not_stdout() {
    cli()
        .args(&["session", "--notify", "none"])
        .env("HATCH_LOG", "info")
        .stdin("ask-delete\n")
        .passes()
        .stdout_eq("phase: asking_delete\n")
        .stderr_has("transition");
}

#[test]
fn default_level_is_quiet() {
    cli()
        .args(&["session"])
        .stdin("ask-delete\n")
        .passes()
        .stderr_eq("");
}

#[test]
fn log_path_writes_file() {
    let project = Project::empty();
    let log = project.path().join("logs/hatch.log");

    cli()
        .args(&["session"])
        .env("HATCH_LOG", "info")
        .env("HATCH_LOG_PATH", &log)
        .stdin("start\n")
        .passes()
        .stderr_eq("");

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.contains("transition"), "{content}");
    assert!(content.contains("build created"), "{content}");
}

#[test]
fn invalid_filter_fails() {
    cli()
        .args(&["scenario"])
        .env("HATCH_LOG", "hatch_engine=loud")
        .fails()
        .stderr_has("invalid HATCH_LOG");
}
