// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load the JSON configuration file and fill API credentials from the environment
// role: config/loader
// inputs: Optional config path; env TESTLODGE_API_URL, TESTLODGE_API_EMAIL, TESTLODGE_API_TOKEN
// outputs: FileConfig with every field defaulted
// invariants:
// - A missing --config means all defaults; a named file that cannot be read or parsed is an error
// - Unknown keys are rejected so typos surface instead of silently falling back
// - Env only fills credentials the file leaves empty
// errors: IO and JSON errors carry the file path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::testlodge::paginate::DEFAULT_PAGE_SIZE;

pub const ENV_API_URL: &str = "TESTLODGE_API_URL";
pub const ENV_API_EMAIL: &str = "TESTLODGE_API_EMAIL";
pub const ENV_API_TOKEN: &str = "TESTLODGE_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
  pub api_url: String,
  pub api_email: Option<String>,
  pub api_token: Option<String>,
  pub page_size: u32,

  pub workbook: Option<PathBuf>,
  pub datespan_range: String,
  pub project_squads_range: String,
  pub user_overrides_range: String,
  pub summary_sheet: String,
  pub changelog_sheet: String,
  pub log_sheet: String,
  /// 1-based report column each sheet is sorted by, descending.
  pub changelog_sort_column: usize,
  pub summary_sort_column: usize,

  pub holidays: Vec<NaiveDate>,
  /// IANA name, e.g. "America/Sao_Paulo".
  pub timezone: String,
}

impl Default for FileConfig {
  fn default() -> Self {
    Self {
      api_url: String::new(),
      api_email: None,
      api_token: None,
      page_size: DEFAULT_PAGE_SIZE,
      workbook: None,
      datespan_range: "Config!B2".into(),
      project_squads_range: "TestLodge Squads!A2:B".into(),
      user_overrides_range: "Users!A2:B".into(),
      summary_sheet: "TestLodge".into(),
      changelog_sheet: "TestLodge Changelog".into(),
      log_sheet: "Logs".into(),
      changelog_sort_column: 2,
      summary_sort_column: 5,
      holidays: Vec::new(),
      timezone: "UTC".into(),
    }
  }
}

fn env_nonempty(key: &str) -> Option<String> {
  std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn blank(v: &Option<String>) -> bool {
  v.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true)
}

impl FileConfig {
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let Some(path) = path else {
      return Ok(Self::default());
    };

    let raw = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
  }

  pub fn with_env_credentials(mut self) -> Self {
    if self.api_url.trim().is_empty() {
      self.api_url = env_nonempty(ENV_API_URL).unwrap_or_default();
    }
    if blank(&self.api_email) {
      self.api_email = env_nonempty(ENV_API_EMAIL);
    }
    if blank(&self.api_token) {
      self.api_token = env_nonempty(ENV_API_TOKEN);
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use std::io::Write;

  #[test]
  fn missing_path_means_defaults() {
    let cfg = FileConfig::load(None).unwrap();
    assert_eq!(cfg, FileConfig::default());
    assert_eq!(cfg.page_size, 100);
    assert_eq!(cfg.project_squads_range, "TestLodge Squads!A2:B");
  }

  #[test]
  fn partial_file_keeps_remaining_defaults() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, r#"{{ "timezone": "America/Sao_Paulo", "holidays": ["2025-12-25"], "page_size": 50 }}"#).unwrap();

    let cfg = FileConfig::load(Some(f.path())).unwrap();
    assert_eq!(cfg.timezone, "America/Sao_Paulo");
    assert_eq!(cfg.holidays, vec![NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()]);
    assert_eq!(cfg.page_size, 50);
    assert_eq!(cfg.summary_sheet, "TestLodge");
  }

  #[test]
  fn unknown_keys_and_unreadable_files_fail_with_path() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, r#"{{ "timezon": "UTC" }}"#).unwrap();
    let err = FileConfig::load(Some(f.path())).unwrap_err();
    assert!(format!("{:#}", err).contains("parsing config"));

    let err = FileConfig::load(Some(Path::new("/nonexistent/tlr.json"))).unwrap_err();
    assert!(format!("{:#}", err).contains("reading config /nonexistent/tlr.json"));
  }

  #[test]
  #[serial]
  fn env_fills_only_missing_credentials() {
    let _env = test_support::with_env(&[
      (ENV_API_URL, "https://env.example.com/api/v1"),
      (ENV_API_EMAIL, "env@example.com"),
      (ENV_API_TOKEN, "env-token"),
    ]);

    let from_env = FileConfig::default().with_env_credentials();
    assert_eq!(from_env.api_url, "https://env.example.com/api/v1");
    assert_eq!(from_env.api_email.as_deref(), Some("env@example.com"));
    assert_eq!(from_env.api_token.as_deref(), Some("env-token"));

    let file = FileConfig {
      api_url: "https://file.example.com".into(),
      api_email: Some("file@example.com".into()),
      api_token: Some("  ".into()),
      ..FileConfig::default()
    }
    .with_env_credentials();
    assert_eq!(file.api_url, "https://file.example.com");
    assert_eq!(file.api_email.as_deref(), Some("file@example.com"));
    assert_eq!(file.api_token.as_deref(), Some("env-token"));
  }
}
