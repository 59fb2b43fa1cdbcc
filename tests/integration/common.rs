use std::path::{Path, PathBuf};

use test_support::{BIN, cmd_bin, copy_fixture, fixtures_dir};

pub const NOW: &str = "2025-08-15T12:00:00Z";

/// Command wired to the fixture API and config, with real credentials scrubbed.
pub fn report_cmd(workbook: &Path) -> assert_cmd::Command {
  let mut cmd = cmd_bin(BIN);
  cmd
    .env("TLR_TEST_API_JSON", fixtures_dir().join("api.json"))
    .env_remove("TESTLODGE_API_EMAIL")
    .env_remove("TESTLODGE_API_TOKEN")
    .env_remove("TESTLODGE_API_URL")
    .env("RUST_LOG", "warn")
    .args(["--config", fixtures_dir().join("config.json").to_str().unwrap()])
    .args(["--workbook", workbook.to_str().unwrap()])
    .args(["--now-override", NOW]);
  cmd
}

pub fn workbook_copy(dir: &Path) -> PathBuf {
  copy_fixture("workbook.json", dir)
}

pub fn sheet(workbook: &Path, name: &str) -> Vec<serde_json::Value> {
  let text = std::fs::read_to_string(workbook).unwrap();
  let v: serde_json::Value = serde_json::from_str(&text).unwrap();
  v["sheets"][name].as_array().cloned().unwrap_or_default()
}
