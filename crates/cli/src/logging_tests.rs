// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    default      = { None },
    level        = { Some("debug") },
    per_crate    = { Some("hatch_engine=info,warn") },
)]
fn accepts_filters(directives: Option<&str>) {
    assert!(filter(directives).is_ok());
}

#[test]
fn rejects_bad_filter() {
    let err = filter(Some("hatch_engine=loud")).unwrap_err();
    assert!(err.to_string().contains("invalid HATCH_LOG"), "{err}");
}

#[test]
fn file_writer_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs/hatch.log");

    let (_writer, guard) = file_writer(&path).unwrap();
    drop(guard);

    assert!(dir.path().join("logs").is_dir());
}

#[test]
fn file_writer_needs_file_name() {
    assert!(file_writer(Path::new("/")).is_err());
}
