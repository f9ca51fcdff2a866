//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

/// Build command for the netstamp-cli binary (finds it in target/debug when run via cargo test).
fn netstamp_cli() -> Command {
    cargo_bin_cmd!("netstamp-cli")
}

#[test]
fn test_cli_help() {
    let mut cmd = netstamp_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fixture"));
}

#[test]
fn test_cli_version() {
    let mut cmd = netstamp_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_generate_stdout() {
    let mut cmd = netstamp_cli();

    cmd.arg("generate");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"modules\": {\n    \"tests\": {"))
        .stdout(predicate::str::contains("\"transformer_1p_1s\""))
        .stdout(predicate::str::contains("\"q_npn\""));
}

#[test]
fn test_cli_generate_is_deterministic() {
    let first = netstamp_cli().arg("generate").output().unwrap();
    let second = netstamp_cli().arg("generate").output().unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_cli_generate_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analog_test.json");

    let mut cmd = netstamp_cli();
    cmd.arg("generate").arg("--output").arg(&path);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["modules"]["tests"]["cells"].as_object().unwrap().len(), 41);
    assert_eq!(value["modules"]["tests"]["ports"].as_object().unwrap().len(), 23);
}

#[test]
fn test_cli_generate_only_and_module() {
    let mut cmd = netstamp_cli();

    cmd.args(["generate", "--only", "r_h", "--module", "bench", "--compact"]);
    cmd.assert().success().stdout(
        "{\"modules\":{\"bench\":{\"cells\":{\"r_h\":{\"connections\":{\"A\":[0],\"B\":[1]},\
\"port_directions\":{\"A\":\"input\",\"B\":\"output\"},\"type\":\"r_h\"}},\
\"ports\":{\"in0\":{\"bits\":[0],\"direction\":\"input\"},\
\"out1\":{\"bits\":[1],\"direction\":\"output\"}}}}}\n",
    );
}

#[test]
fn test_cli_generate_unknown_tag() {
    let mut cmd = netstamp_cli();

    cmd.args(["generate", "--only", "r_x"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("r_x"));
}

#[test]
fn test_cli_stamps_command() {
    let mut cmd = netstamp_cli();

    cmd.arg("stamps");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("d_led_h"))
        .stdout(predicate::str::contains("op-amp (5 bits)"))
        .stdout(predicate::str::contains("bits [").not());
}

#[test]
fn test_cli_stamps_verbose() {
    let mut cmd = netstamp_cli();

    cmd.arg("stamps").arg("--verbose");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("bits [41, 45)"));
}

#[test]
fn test_cli_check_command() {
    let mut cmd = netstamp_cli();

    cmd.arg("check");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Stamps:      19"))
        .stdout(predicate::str::contains("Bits:        45"))
        .stdout(predicate::str::contains("No schema violations"));
}

#[test]
fn test_cli_check_json() {
    let output = netstamp_cli().args(["check", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stamps"], 19);
    assert_eq!(value["bits"], 45);
    assert_eq!(value["connectivity"]["group_count"], 19);
}

#[cfg(unix)]
#[test]
fn test_cli_render_failure_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("fixture.json");

    let mut cmd = netstamp_cli();
    cmd.arg("render")
        .arg("--skin")
        .arg("analog.svg")
        .arg("--renderer")
        .arg("false")
        .arg("--json")
        .arg(&json);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Renderer failed"));
    assert!(json.exists());
}

#[cfg(unix)]
#[test]
fn test_cli_render_with_env_renderer() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = netstamp_cli();
    cmd.env("NETSTAMP_RENDERER", "true")
        .arg("render")
        .arg("--skin")
        .arg("analog.svg")
        .arg("--json")
        .arg(dir.path().join("fixture.json"))
        .arg("-o")
        .arg(dir.path().join("fixture.svg"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fixture.svg"));
}

#[test]
fn test_cli_output_formats_are_different() {
    let pretty = netstamp_cli().arg("generate").output().unwrap();
    let compact = netstamp_cli()
        .arg("generate")
        .arg("--compact")
        .output()
        .unwrap();

    assert_ne!(
        pretty.stdout, compact.stdout,
        "Different formats should produce different output"
    );
}
