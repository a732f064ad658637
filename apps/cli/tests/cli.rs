use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn courier(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("courier").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("COURIER_CONFIG")
        .env_remove("COURIER_LOG")
        .env_remove("RUST_LOG");
    cmd
}

const FACEBOOK_SETTINGS: &str = r#"
[settings.facebook-conversions-api]
pixel_id = "1234567890"
access_token = "EAAB-secret"
"#;

#[test]
fn list_shows_destinations_and_actions() {
    let dir = TempDir::new().unwrap();
    courier(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("facebook-conversions-api 1.0.0"))
        .stdout(predicate::str::contains("gainsight-px-cloud-action"))
        .stdout(predicate::str::contains("purchase"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn describe_action_prints_fields() {
    let dir = TempDir::new().unwrap();
    let output = courier(&dir)
        .args(["describe", "facebook-conversions-api", "search"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let manifest: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(manifest["key"], "search");
    assert!(manifest["fields"].is_array());
}

#[test]
fn describe_unknown_destination_fails() {
    let dir = TempDir::new().unwrap();
    courier(&dir)
        .args(["describe", "no-such-destination"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown destination `no-such-destination`"));
}

#[test]
fn package_writes_versioned_manifest() {
    let dir = TempDir::new().unwrap();
    courier(&dir)
        .args(["package", "gainsight-px-cloud-action", "--out"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("manifest.json"));

    let path = dir
        .path()
        .join(".courier/dist/gainsight-px-cloud-action/1.0.0/manifest.json");
    let manifest: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(manifest["slug"], "gainsight-px-cloud-action");
    assert_eq!(manifest["actions"].as_array().unwrap().len(), 2);
}

#[test]
fn package_unknown_destination_fails_without_output() {
    let dir = TempDir::new().unwrap();
    courier(&dir)
        .args(["package", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown destination"));
    assert!(!dir.path().join(".courier").exists());
}

#[test]
fn dispatch_rejects_invalid_event_before_sending() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("courier.toml"), FACEBOOK_SETTINGS).unwrap();

    courier(&dir)
        .args(["dispatch", "facebook-conversions-api", "search", "--event", "-"])
        .write_stdin(r#"{"action_source": "website", "currency": "USD"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("event_time"));
}

#[test]
fn dispatch_reports_integration_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, FACEBOOK_SETTINGS).unwrap();
    let event = dir.path().join("event.json");
    std::fs::write(
        &event,
        r#"{
            "event_time": "2021-06-01T12:00:00Z",
            "action_source": "email",
            "currency": "ABC",
            "user_data": {"email": "a@b.co"}
        }"#,
    )
    .unwrap();

    courier(&dir)
        .arg("--config")
        .arg(&config)
        .args(["dispatch", "facebook-conversions-api", "search", "--event"])
        .arg(&event)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ABC is not a valid currency code."));
}

#[test]
fn dispatch_without_settings_fails() {
    let dir = TempDir::new().unwrap();
    courier(&dir)
        .args(["dispatch", "gainsight-px-cloud-action", "track", "--event", "-"])
        .write_stdin(r#"{"user_id": "u", "event": "E"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid settings"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    courier(&dir)
        .args(["--config", "absent.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn env_reaches_nested_log_config() {
    let dir = TempDir::new().unwrap();
    courier(&dir)
        .env("COURIER_LOG__LEVEL", "courier=[")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log filter"));
}
