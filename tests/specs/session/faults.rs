//! Backend failures injected from scenario files

use crate::prelude::*;

const FAILED_START: &str = r#"
[workspace]
id = "ws-5"
name = "gpu"

[latest_build]
transition = "start"
status = "failed"
template_version = "v1"

[[faults]]
op = "start_build"
status = 500
message = "Provisioner unavailable."

[[faults]]
op = "stop_build"

[[faults]]
op = "set_dormant"
status = 403
message = "Insufficient permissions."
"#;

fn session(project: &Project) -> CliBuilder {
    let path = project.file("faults.toml", FAILED_START);
    cli().args(&["session", "--scenario", path.to_str().unwrap()])
}

#[test]
fn retry_clears_build_error() {
    let project = Project::empty();

    session(&project)
        .stdin("start\nretry\n")
        .passes()
        .stdout_eq(
            "\
phase: idle
build error: Provisioner unavailable.
timeline refreshed: ws-5
phase: idle
last build: #2 start pending (v1)
",
        );
}

#[test]
fn failure_without_message_uses_default() {
    let project = Project::empty();

    session(&project)
        .stdin("stop\n")
        .passes()
        .stdout_eq("phase: idle\nbuild error: Failed to build workspace.\n");
}

#[test]
fn activation_failure_is_a_notification() {
    let project = Project::empty();

    session(&project)
        .stdin("activate\n")
        .passes()
        .stdout_eq(
            "\
notification: Activation failed: Insufficient permissions.
phase: idle
",
        );
}
