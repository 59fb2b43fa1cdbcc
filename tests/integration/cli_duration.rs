use test_support::{BIN, cmd_bin, fixtures_dir};

fn duration_cmd() -> assert_cmd::Command {
  let mut cmd = cmd_bin(BIN);
  cmd.args(["--config", fixtures_dir().join("config.json").to_str().unwrap()]);
  cmd
}

#[test]
fn duration_prints_business_hours() {
  let out = duration_cmd()
    .args(["duration", "--start", "2025-08-14 10:15", "--end", "2025-08-14 15:50"])
    .output()
    .unwrap();
  assert!(out.status.success());

  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(v["hours"], 5.0);
}

#[test]
fn duration_skips_configured_holidays() {
  // 2025-08-20 is a holiday in the fixture config.
  let out = duration_cmd()
    .args(["duration", "--start", "2025-08-20 09:00", "--end", "2025-08-20 18:00"])
    .output()
    .unwrap();
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(v["hours"], 1.0);
}

#[test]
fn durations_pairs_markers_from_file() {
  let out = duration_cmd()
    .args(["durations", "--markers", fixtures_dir().join("markers.json").to_str().unwrap()])
    .output()
    .unwrap();
  assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(v["durations"], serde_json::json!([4.0, 12.0]));
}

#[test]
fn invalid_dates_fail_naming_both_inputs() {
  let out = duration_cmd()
    .args(["duration", "--start", "yesterday", "--end", "2025-08-14 12:00"])
    .output()
    .unwrap();
  assert!(!out.status.success());
  let err = String::from_utf8_lossy(&out.stderr);
  assert!(err.contains("Invalid date input. Given: start - yesterday, end - 2025-08-14 12:00"), "{}", err);
}
