//! Start, stop and delete through a session

use crate::prelude::*;

#[test]
fn start_stop_delete_transcript() {
    cli()
        .args(&["session"])
        .stdin(
            "status\n\
             start\n\
             stop\n\
             complete succeeded\n\
             stop\n\
             complete succeeded\n\
             ask-delete\n\
             cancel-delete\n\
             ask-delete\n\
             delete\n",
        )
        .passes()
        .stdout_eq(
            "\
workspace: dev (ws-1, start succeeded) outdated
latest build: #1 start succeeded (v1)
phase: idle
timeline refreshed: ws-1
phase: idle
last build: #2 start pending (v1)
phase: idle
last build: #2 start pending (v1)
build error: A workspace build is already active.
workspace: dev (ws-1, start succeeded) outdated
latest build: #2 start succeeded (v1)
timeline refreshed: ws-1
phase: idle
last build: #3 stop pending (v1)
workspace: dev (ws-1, stop succeeded) outdated
latest build: #3 stop succeeded (v1)
phase: asking_delete
last build: #3 stop pending (v1)
phase: idle
last build: #3 stop pending (v1)
phase: asking_delete
last build: #3 stop pending (v1)
timeline refreshed: ws-1
phase: idle
last build: #4 delete pending (v1)
",
        );
}

#[test]
fn events_outside_their_phase_are_ignored() {
    cli()
        .args(&["session"])
        .stdin("delete\ncancel-delete\nask-delete\nstart\nretry\n")
        .passes()
        .stdout_eq(
            "\
ignored
ignored
phase: asking_delete
ignored
ignored
",
        );
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    cli()
        .args(&["session"])
        .stdin("# open the gate\n\n   \nask-delete\n")
        .passes()
        .stdout_eq("phase: asking_delete\n");
}

#[test]
fn retry_reissues_failed_stop() {
    let project = Project::empty();
    let path = project.file(
        "failed-stop.toml",
        r#"
[workspace]
id = "ws-3"
name = "api"

[latest_build]
transition = "stop"
status = "failed"
template_version = "v4"
"#,
    );

    cli()
        .args(&["session", "--scenario", path.to_str().unwrap()])
        .stdin("retry\nstatus\n")
        .passes()
        .stdout_eq(
            "\
timeline refreshed: ws-3
phase: idle
last build: #2 stop pending (v4)
workspace: api (ws-3, stop pending)
latest build: #2 stop pending (v4)
phase: idle
last build: #2 stop pending (v4)
",
        );
}

#[test]
fn activate_dormant_workspace() {
    let project = Project::empty();
    let content = MINIMAL_SCENARIO.replace("name = \"scratch\"", "name = \"scratch\"\ndormant = true");
    let path = project.file("dormant.toml", &content);

    cli()
        .args(&["session", "--scenario", path.to_str().unwrap()])
        .stdin("status\nactivate\nstatus\n")
        .passes()
        .stdout_eq(
            "\
workspace: scratch (ws-7, stop succeeded) dormant
latest build: #1 stop succeeded (v1)
phase: idle
phase: idle
workspace: scratch (ws-7, stop succeeded)
latest build: #1 stop succeeded (v1)
phase: idle
",
        );
}
