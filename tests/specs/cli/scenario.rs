//! `hatch scenario` specs

use crate::prelude::*;

#[test]
fn prints_sample() {
    cli()
        .args(&["scenario"])
        .passes()
        .stdout_has("active_version = \"v2\"")
        .stdout_has("[[versions.parameters]]");
}

#[test]
fn sample_is_a_valid_scenario() {
    let sample = cli().args(&["scenario"]).passes().stdout();
    let project = Project::empty();
    let path = project.file("sample.toml", &sample);

    cli()
        .args(&["params", "--scenario", path.to_str().unwrap()])
        .passes()
        .stdout_eq("size\n");
}

#[test]
fn json_output() {
    let run = cli().args(&["-o", "json", "scenario"]).passes();
    let value: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();

    assert_eq!(value["workspace"]["id"], "ws-1");
    assert_eq!(value["latest_build"]["template_version"], "v1");
    assert_eq!(value["versions"].as_array().map(Vec::len), Some(2));
}
