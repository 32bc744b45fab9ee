// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hatch_adapters::GatewayOp;
use hatch_core::GatewayFailure;
use serial_test::serial;

fn sample_session(format: OutputFormat) -> (Session, InMemoryGateway) {
    let backend = Scenario::load(None).unwrap().gateway().unwrap();
    let notifier = SessionNotifier::new(NotifyTarget::None, format);
    (Session::new(backend.clone(), notifier, format), backend)
}

fn plain() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

async fn run(session: &mut Session, line: &str) -> String {
    let command = parse_command(line).unwrap().unwrap();
    session.handle(command).await.unwrap()
}

// -- Parsing ----------------------------------------------------------------

#[yare::parameterized(
    stop          = { "stop",          Event::Stop },
    ask_delete    = { "ask-delete",    Event::AskDelete },
    delete        = { "delete",        Event::Delete },
    cancel_delete = { "cancel-delete", Event::CancelDelete },
    cancel        = { "cancel",        Event::Cancel },
    retry         = { "retry",         Event::RetryBuild },
    activate      = { "activate",      Event::Activate },
    start         = { "start",         Event::start() },
    update        = { "  update  ",    Event::update() },
)]
fn parses_events(line: &str, event: Event) {
    assert_eq!(parse_command(line), Ok(Some(SessionCommand::Send(event))));
}

#[test]
fn parses_parameters() {
    assert_eq!(
        parse_command("update size=large region=us"),
        Ok(Some(SessionCommand::Send(Event::Update {
            parameters: Some(vec![
                BuildParameter::new("size", "large"),
                BuildParameter::new("region", "us"),
            ])
        })))
    );
}

#[test]
fn parses_complete_and_status() {
    assert_eq!(
        parse_command("complete failed"),
        Ok(Some(SessionCommand::Complete(BuildStatus::Failed)))
    );
    assert_eq!(parse_command("status"), Ok(Some(SessionCommand::Status)));
}

#[yare::parameterized(
    blank   = { "" },
    spaces  = { "   " },
    comment = { "# start the workspace" },
)]
fn skips_blank_and_comments(line: &str) {
    assert_eq!(parse_command(line), Ok(None));
}

#[yare::parameterized(
    unknown        = { "launch",            "unknown command: launch" },
    stray_arg      = { "stop now",          "stop takes no arguments" },
    bad_assignment = { "start size",        "expected name=value, got 'size'" },
    no_status      = { "complete",          "usage: complete <status>" },
    bad_status     = { "complete exploded", "unknown build status: exploded" },
    status_arg     = { "status all",        "status takes no arguments" },
)]
fn rejects_bad_lines(line: &str, error: &str) {
    assert_eq!(parse_command(line), Err(error.to_string()));
}

// -- Session ----------------------------------------------------------------

#[tokio::test]
#[serial]
async fn start_refreshes_and_shows_new_build() {
    plain();
    let (mut session, backend) = sample_session(OutputFormat::Text);

    let out = run(&mut session, "start").await;

    assert_eq!(
        out,
        "timeline refreshed: ws-1\n\
         phase: idle\n\
         last build: #2 start pending (v1)\n"
    );
    assert_eq!(backend.history().len(), 2);
}

#[tokio::test]
#[serial]
async fn backend_refusal_becomes_build_error() {
    plain();
    let (mut session, _backend) = sample_session(OutputFormat::Text);
    run(&mut session, "start").await;

    // Latest build is still pending
    let out = run(&mut session, "stop").await;

    assert_eq!(
        out,
        "phase: idle\n\
         last build: #2 start pending (v1)\n\
         build error: A workspace build is already active.\n"
    );
}

#[tokio::test]
#[serial]
async fn delete_needs_confirmation() {
    plain();
    let (mut session, backend) = sample_session(OutputFormat::Text);

    assert_eq!(
        run(&mut session, "ask-delete").await,
        "phase: asking_delete\n"
    );
    assert_eq!(run(&mut session, "stop").await, "ignored\n");

    let out = run(&mut session, "delete").await;
    assert!(out.starts_with("timeline refreshed: ws-1\n"), "{out}");
    assert!(out.contains("last build: #2 delete pending (v1)"), "{out}");
    assert_eq!(backend.workspace().latest_build.build_number, 2);
}

#[tokio::test]
#[serial]
async fn update_asks_for_missing_parameters() {
    plain();
    let (mut session, backend) = sample_session(OutputFormat::Text);

    assert_eq!(
        run(&mut session, "update").await,
        "phase: awaiting_missing_parameters\n\
         missing parameters for v2: size\n"
    );

    let out = run(&mut session, "update size=large").await;
    assert_eq!(
        out,
        "timeline refreshed: ws-1\n\
         phase: idle\n\
         last build: #2 start pending (v2)\n"
    );
    assert!(!backend.workspace().outdated);
}

#[tokio::test]
#[serial]
async fn complete_and_status_show_workspace() {
    plain();
    let (mut session, _backend) = sample_session(OutputFormat::Text);
    run(&mut session, "start").await;

    assert_eq!(
        run(&mut session, "complete failed").await,
        "workspace: dev (ws-1, start failed) outdated\n\
         latest build: #2 start failed (v1)\n"
    );

    let out = run(&mut session, "status").await;
    assert!(out.starts_with("workspace: dev (ws-1, start failed)"), "{out}");
    assert!(out.contains("phase: idle\n"), "{out}");
}

#[tokio::test]
#[serial]
async fn retry_after_failed_build_uses_debug() {
    plain();
    let (mut session, backend) = sample_session(OutputFormat::Text);
    run(&mut session, "start").await;
    run(&mut session, "complete failed").await;

    let out = run(&mut session, "retry").await;

    assert!(out.contains("last build: #3 start pending (v1)"), "{out}");
    let latest = backend.workspace().latest_build;
    assert_eq!(latest.log_level, Some(hatch_core::LogLevel::Debug));
}

#[tokio::test]
#[serial]
async fn cancel_reports_server_message_without_refresh() {
    plain();
    let (mut session, backend) = sample_session(OutputFormat::Text);
    run(&mut session, "start").await;

    let out = run(&mut session, "cancel").await;

    assert_eq!(
        out,
        "phase: idle\n\
         last build: #2 start pending (v1)\n\
         canceled: Job has been marked as canceled...\n"
    );
    assert_eq!(
        backend.workspace().latest_build.status,
        BuildStatus::Canceled
    );
}

#[tokio::test]
#[serial]
async fn cancel_of_completed_build_is_refused() {
    plain();
    let (mut session, _backend) = sample_session(OutputFormat::Text);

    assert_eq!(
        run(&mut session, "cancel").await,
        "phase: idle\n\
         cancel error: Job has already completed!\n"
    );
}

#[tokio::test]
async fn json_output_is_one_line_per_message() {
    let (mut session, backend) = sample_session(OutputFormat::Json);
    backend.fail_next(
        GatewayOp::StopBuild,
        GatewayFailure::api(500, "Internal error."),
    );

    let out = run(&mut session, "stop").await;
    let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(value["event"], "build:stop");
    assert_eq!(value["accepted"], true);
    assert_eq!(value["view"]["phase"], "idle");
    assert_eq!(value["view"]["build_error"], "Internal error.");

    run(&mut session, "ask-delete").await;
    let out = run(&mut session, "start").await;
    let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(value["accepted"], false);
    assert_eq!(value["phase"], "asking_delete");
}

#[tokio::test]
async fn json_refresh_line() {
    let (mut session, _backend) = sample_session(OutputFormat::Json);

    let out = run(&mut session, "start").await;
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], r#"{"timeline_refreshed":"ws-1"}"#);
}
