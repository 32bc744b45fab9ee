//! Canceling builds through a session

use crate::prelude::*;

#[test]
fn cancel_pending_build_notifies() {
    cli()
        .args(&["session"])
        .stdin("start\ncancel\nstatus\n")
        .passes()
        .stdout_eq(
            "\
timeline refreshed: ws-1
phase: idle
last build: #2 start pending (v1)
notification: Build canceled: Job has been marked as canceled...
phase: idle
last build: #2 start pending (v1)
canceled: Job has been marked as canceled...
workspace: dev (ws-1, start canceled) outdated
latest build: #2 start canceled (v1)
phase: idle
last build: #2 start pending (v1)
canceled: Job has been marked as canceled...
",
        );
}

#[test]
fn cancel_twice_is_refused() {
    cli()
        .args(&["session", "--notify", "none"])
        .stdin("start\ncomplete running\ncancel\ncancel\n")
        .passes()
        .stdout_has("canceled: Job has been marked as canceled...\n")
        .stdout_has("cancel error: Job has already been marked as canceled!\n");
}

#[test]
fn cancel_of_finished_build_is_refused() {
    cli()
        .args(&["session"])
        .stdin("cancel\n")
        .passes()
        .stdout_eq("phase: idle\ncancel error: Job has already completed!\n");
}

#[test]
fn notify_none_prints_nothing_extra() {
    cli()
        .args(&["session", "--notify", "none"])
        .stdin("start\ncancel\n")
        .passes()
        .stdout_lacks("notification:");
}
