use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(dir: &Path, lights: &[(&str, &str)]) -> std::path::PathBuf {
    let mut contents = String::from("[client]\ntimeout_ms = 1000\nmax_attempts = 1\nretry_delay_ms = 1\n");
    for (name, ip) in lights {
        contents.push_str(&format!("\n[[lights]]\nname = \"{name}\"\nip = \"{ip}\"\n"));
    }
    let path = dir.join("keylight.toml");
    fs::write(&path, contents).unwrap();
    path
}

fn keylight(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("keylight").unwrap();
    cmd.env_remove("KEYLIGHT_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("keylight")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("on"))
        .stdout(predicate::str::contains("off"))
        .stdout(predicate::str::contains("tui"));
}

#[test]
fn test_list_prints_configured_lights() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &[("Desk", "10.0.0.5:9123"), ("Shelf", "10.0.0.6")]);

    keylight(&config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Desk\""))
        .stdout(predicate::str::contains("http://10.0.0.6/elgato/lights"));
}

#[test]
fn test_list_as_table() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &[("Desk", "10.0.0.5")]);

    keylight(&config)
        .args(["list", "--table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("Desk"));
}

#[test]
fn test_unknown_light_lists_available_names() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &[("Desk", "10.0.0.5"), ("Shelf", "10.0.0.6")]);

    keylight(&config)
        .args(["status", "--light", "Lamp"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Light with name 'Lamp' not found. Available lights: Desk, Shelf",
        ));
}

#[test]
fn test_out_of_range_brightness_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &[("Desk", "10.0.0.5")]);

    keylight(&config)
        .args(["on", "--brightness", "150"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("brightness must be between 0 and 100"));
}

#[test]
fn test_out_of_range_temperature_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &[("Desk", "10.0.0.5")]);

    keylight(&config)
        .args(["on", "-k", "9000"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("temperature must be between 2900K and 7000K"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();

    keylight(&dir.path().join("absent.toml"))
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"error\": \"config\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_reports_each_light() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elgato/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numberOfLights": 1,
            "lights": [{ "on": 1, "brightness": 45, "temperature": 250 }]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let address = server.address().to_string();
    let config = write_config(dir.path(), &[("Desk", address.as_str())]);

    let assert = tokio::task::spawn_blocking(move || {
        keylight(&config).args(["status", "--table"]).assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Desk"))
        .stdout(predicate::str::contains("ON"))
        .stdout(predicate::str::contains("45%"))
        .stdout(predicate::str::contains("4000K (mired: 250)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_failure_is_reported_per_light() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/elgato/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lights": [] })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let address = server.address().to_string();
    let config = write_config(dir.path(), &[("Desk", address.as_str())]);

    let assert = tokio::task::spawn_blocking(move || keylight(&config).arg("off").assert())
        .await
        .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("\"status\": \"error\""))
        .stdout(predicate::str::contains("\"error\": \"empty_response\""));
}
