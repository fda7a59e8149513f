//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::process::Command;

use tempfile::TempDir;

/// Data directory with an instant, failure-free feed.
fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["config", "set", "refresh.fetch_latency_ms", "0"]);
    dir
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_transitboard"))
        .args(args)
        .env("TRANSITBOARD_DATA_DIR", dir.path())
        .env_remove("TRANSITBOARD_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_alerts_list_json() {
    let dir = data_dir();
    let (stdout, stderr, code) = run_cli(&dir, &["alerts", "list", "--json"]);
    assert_eq!(code, 0, "alerts list failed: {stderr}");
    let alerts = parse_json(&stdout);
    assert_eq!(alerts.as_array().unwrap().len(), 6);
    assert!(stderr.contains("Alerts refreshed successfully!"));
}

#[test]
fn test_alerts_list_text() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["alerts", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Good service: 20"));
    assert!(stdout.contains("Weekend Service Changes"));
}

#[test]
fn test_alerts_stats() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["alerts", "stats"]);
    assert_eq!(code, 0);
    let stats = parse_json(&stdout);
    assert_eq!(stats["critical"], 1);
    assert_eq!(stats["rush_hour"], 3);
    assert_eq!(stats["good_service_lines"], 20);
}

#[test]
fn test_alerts_show_unknown_id_fails() {
    let dir = data_dir();
    let (_, stderr, code) = run_cli(&dir, &["alerts", "show", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: alert not found: nope"));

    let (stdout, _, code) = run_cli(&dir, &["alerts", "show", "2"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["title"], "Weekend Service Changes");
}

#[test]
fn test_filter_persists_between_runs() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["filter", "set", "--line", "nqr"]);
    assert_eq!(code, 0);
    let event = parse_json(&stdout);
    assert_eq!(event["type"], "CriteriaChanged");
    assert_eq!(event["shown"], 1);

    let (stdout, _, _) = run_cli(&dir, &["filter", "show"]);
    assert_eq!(parse_json(&stdout)["line_group"], "NQR");

    let (stdout, _, _) = run_cli(&dir, &["alerts", "list", "--json"]);
    assert_eq!(parse_json(&stdout).as_array().unwrap().len(), 1);

    run_cli(&dir, &["filter", "reset"]);
    let (stdout, _, _) = run_cli(&dir, &["alerts", "list", "--json"]);
    assert_eq!(parse_json(&stdout).as_array().unwrap().len(), 6);
}

#[test]
fn test_rush_mode() {
    let dir = data_dir();
    let (stdout, stderr, code) = run_cli(&dir, &["filter", "rush", "on"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["shown"], 3);
    assert!(stderr.contains("Rush Hour Mode ON"));

    // Already on: no toggle, no notice.
    let (_, stderr, _) = run_cli(&dir, &["filter", "rush", "on"]);
    assert!(!stderr.contains("Rush Hour Mode"));
}

#[test]
fn test_export_csv() {
    let dir = data_dir();
    let (stdout, stderr, code) = run_cli(&dir, &["alerts", "export", "--format", "csv"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("title,description,lines,severity,timestamp"));
    assert_eq!(stdout.trim_end().lines().count(), 7);
    assert!(stderr.contains("Exported 6 alerts as CSV"));
}

#[test]
fn test_export_into_directory() {
    let dir = data_dir();
    let out = TempDir::new().unwrap();
    let (_, _, code) = run_cli(
        &dir,
        &["alerts", "export", "--output", out.path().to_str().unwrap()],
    );
    assert_eq!(code, 0);
    let written = std::fs::read_to_string(out.path().join("subway-alerts.json")).unwrap();
    assert_eq!(parse_json(&written).as_array().unwrap().len(), 6);
}

#[test]
fn test_prefs_theme_and_clear() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["prefs", "theme", "toggle"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["settings"]["theme"], "dark");

    let (_, stderr, code) = run_cli(&dir, &["prefs", "theme", "purple"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown theme"));

    let (_, stderr, code) = run_cli(&dir, &["prefs", "clear"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("All preferences cleared!"));

    let (stdout, _, _) = run_cli(&dir, &["prefs", "show"]);
    assert_eq!(parse_json(&stdout)["theme"], "light");
}

#[test]
fn test_config_get_set() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "refresh.interval_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "120");

    let (_, _, code) = run_cli(&dir, &["config", "set", "refresh.interval_secs", "30"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "refresh.interval_secs"]);
    assert_eq!(stdout.trim(), "30");

    let (_, stderr, code) = run_cli(&dir, &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}
