// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: TestLodge API access behind a trait seam (HTTP via ureq, JSON fixtures for tests)
// role: testlodge/api
// inputs: Base URL and Basic-auth credentials from EffectiveConfig; env TLR_TEST_API_JSON selects the fixture backend
// outputs: Raw JSON documents per (endpoint, query)
// side_effects: Network calls to the TestLodge API; reads the fixture file once when mocked
// invariants:
// - Authorization is `Basic base64(email:token)` on every request
// - Non-2xx responses, transport failures and non-JSON bodies are errors (no retry)
// - Fixture backend answers unknown endpoints with an empty page envelope
// errors: Propagated with the request URL as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::cli::EffectiveConfig;
use crate::error::ReportError;

pub const FIXTURE_ENV: &str = "TLR_TEST_API_JSON";

// --- Trait seam for the TestLodge API ---
pub trait TestLodgeApi {
  fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> Result<serde_json::Value>;
}

pub fn basic_authorization(email: &str, token: &str) -> String {
  format!("Basic {}", STANDARD.encode(format!("{}:{}", email, token)))
}

pub struct TestLodgeHttpApi {
  base_url: String,
  authorization: String,
  agent: ureq::Agent,
}

impl TestLodgeHttpApi {
  pub fn new(base_url: &str, email: &str, token: &str) -> Self {
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      authorization: basic_authorization(email, token),
      agent: ureq::Agent::config_builder().build().into(),
    }
  }
}

impl TestLodgeApi for TestLodgeHttpApi {
  fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> Result<serde_json::Value> {
    let url = format!("{}{}", self.base_url, endpoint);
    debug!(%url, ?query, "GET");

    let mut req = self
      .agent
      .get(&url)
      .header("Authorization", self.authorization.as_str())
      .header("Content-Type", "application/json")
      .header("Accept", "application/json")
      .header("User-Agent", "testlodge-report");

    for (k, v) in query {
      req = req.query(*k, v.as_str());
    }

    let mut resp = req.call().with_context(|| format!("GET {}", url))?;

    resp
      .body_mut()
      .read_json::<serde_json::Value>()
      .with_context(|| format!("parsing JSON from {}", url))
  }
}

/// Canned responses keyed by `"<endpoint>?page=<n>"`, loaded from a JSON object file.
pub struct TestLodgeFixtureApi {
  pages: serde_json::Map<String, serde_json::Value>,
}

impl TestLodgeFixtureApi {
  pub fn from_file(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading API fixtures {}", path.display()))?;
    let value: serde_json::Value =
      serde_json::from_str(&text).with_context(|| format!("parsing API fixtures {}", path.display()))?;

    match value {
      serde_json::Value::Object(pages) => Ok(Self { pages }),
      _ => anyhow::bail!("API fixtures {} must be a JSON object", path.display()),
    }
  }

  pub fn from_pages(pages: serde_json::Map<String, serde_json::Value>) -> Self {
    Self { pages }
  }

  pub fn fixture_key(endpoint: &str, query: &[(&str, String)]) -> String {
    let page = query
      .iter()
      .find(|(k, _)| *k == "page")
      .map(|(_, v)| v.as_str())
      .unwrap_or("1");
    format!("{}?page={}", endpoint, page)
  }
}

impl TestLodgeApi for TestLodgeFixtureApi {
  fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> Result<serde_json::Value> {
    let key = Self::fixture_key(endpoint, query);

    Ok(
      self
        .pages
        .get(&key)
        .cloned()
        .unwrap_or_else(|| serde_json::json!({ "pagination": { "total_entries": 0, "next_page": null } })),
    )
  }
}

/// Select the backend: fixtures when `TLR_TEST_API_JSON` is set, otherwise HTTP with configured credentials.
pub fn build_api(cfg: &EffectiveConfig) -> Result<Box<dyn TestLodgeApi>> {
  if let Ok(path) = std::env::var(FIXTURE_ENV) {
    if !path.trim().is_empty() {
      debug!(%path, "using fixture-backed TestLodge API");
      return Ok(Box::new(TestLodgeFixtureApi::from_file(Path::new(&path))?));
    }
  }

  let api = &cfg.api;

  if api.base_url.trim().is_empty() {
    return Err(ReportError::MissingConfig("api_url (or TESTLODGE_API_URL)".into()).into());
  }
  let email = api
    .email
    .as_deref()
    .ok_or_else(|| ReportError::MissingConfig("api_email (or TESTLODGE_API_EMAIL)".into()))?;
  let token = api
    .token
    .as_deref()
    .ok_or_else(|| ReportError::MissingConfig("api_token (or TESTLODGE_API_TOKEN)".into()))?;

  Ok(Box::new(TestLodgeHttpApi::new(&api.base_url, email, token)))
}
