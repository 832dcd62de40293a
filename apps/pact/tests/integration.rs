//! Integration tests for the pact CLI

use std::io::Write;
use std::process::{Command, Output};

fn pact(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pact"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("PACT_OUTPUT")
        .env_remove("PACT_SAFE_RESUME")
        .env_remove("PACT_FETCH_UNNEEDED")
        .env("PACT_CONFIG", "/nonexistent/pact.toml")
        .output()
        .expect("Failed to execute pact")
}

fn pact_with_config(config: &str, args: &[&str]) -> Output {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{config}").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let mut full = vec!["--config", path.as_str()];
    full.extend_from_slice(args);
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pact"));
    cmd.args(&full)
        .env_remove("RUST_LOG")
        .env_remove("PACT_OUTPUT")
        .env_remove("PACT_SAFE_RESUME")
        .env_remove("PACT_FETCH_UNNEEDED");
    cmd.output().expect("Failed to execute pact")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_cli_version() {
    let output = pact(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("pact"));
}

#[test]
fn test_cli_help() {
    let output = pact(&["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Construct and inspect package manager actions"));
    assert!(out.contains("new"));
    assert!(out.contains("supports"));
}

#[test]
fn test_new_action_forbidden() {
    let output = pact(&["--config", "/dev/null", "new", "Action", "test"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("construction forbidden"));
}

#[test]
fn test_new_action_forbidden_json_report() {
    let output = pact(&["--config", "/dev/null", "--json", "new", "Action"]);
    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["type"], "error");
    assert_eq!(json["data"]["kind"], "construction_forbidden");
    assert_eq!(json["data"]["code"], "action.construction_forbidden");
}

#[test]
fn test_new_rejects_stray_construction_keys() {
    let output = pact(&[
        "--config",
        "/dev/null",
        "new",
        "FetchAction",
        r#"{"new": "FetchActionOptions", "arg": [true, false]}"#,
    ]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("invalid argument"));
    assert!(err.contains("action.unrecognized_option"));
}

#[test]
fn test_new_fetch_action_options_json() {
    let output = pact(&[
        "--config",
        "/dev/null",
        "--json",
        "new",
        "FetchActionOptions",
        "false",
        "true",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["type"], "object");
    assert_eq!(json["data"]["class"], "FetchActionOptions");
    assert_eq!(json["data"]["value"]["safe_resume"], false);
    assert_eq!(json["data"]["value"]["fetch_unneeded"], true);
}

#[test]
fn test_new_fetch_action_nested() {
    let output = pact(&[
        "--config",
        "/dev/null",
        "new",
        "FetchAction",
        r#"{"new": "FetchActionOptions", "args": [{"safe_resume": true}]}"#,
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("safe_resume=true"));
}

#[test]
fn test_new_fetch_action_type_mismatch() {
    let output = pact(&["--config", "/dev/null", "new", "FetchAction", "foo"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("type mismatch"));
}

#[test]
fn test_new_info_action_rejects_argument() {
    let output = pact(&["--config", "/dev/null", "new", "InfoAction", ""]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid argument"));
}

#[test]
fn test_fetch_options_from_config() {
    let output = pact_with_config("[fetch]\nfetch_unneeded = true\n", &["fetch-options"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("safe_resume: false"));
    assert!(out.contains("fetch_unneeded: true"));
}

#[test]
fn test_fetch_options_bad_config_key() {
    let output = pact_with_config("[fetch]\nmonkey = false\n", &["fetch-options"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("monkey"));
}

#[test]
fn test_supports() {
    let config = "[repositories.gentoo]\nformat = \"source\"\n\n[repositories.installed]\nformat = \"installed\"\n";
    let output = pact_with_config(config, &["supports", "config"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("installed"));
    assert!(!out.contains("gentoo"));
}
