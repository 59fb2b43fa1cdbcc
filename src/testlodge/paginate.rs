// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Walk TestLodge page-numbered listings and parse items into typed records
// role: testlodge/pagination
// inputs: &dyn TestLodgeApi, endpoint, envelope item key, page size
// outputs: Vec<T> concatenated across pages in response order
// invariants:
// - Pages are requested sequentially from 1; the count is never assumed up front
// - Stops on total_entries == 0, a null/missing next_page, or a missing pagination envelope
// - Any transport or payload error aborts the whole listing (no partial results, no retry)
// errors: ReportError::Payload naming the endpoint, page and bad element
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::api::TestLodgeApi;
use crate::error::ReportError;
use crate::ext::serde_json::JsonFetch;
use crate::model::{Project, Run, Step, Suite, User};

pub const DEFAULT_PAGE_SIZE: u32 = 100;

pub struct Paginator<'a> {
  api: &'a dyn TestLodgeApi,
  per_page: u32,
}

impl<'a> Paginator<'a> {
  pub fn new(api: &'a dyn TestLodgeApi, per_page: u32) -> Self {
    Self { api, per_page }
  }

  pub fn fetch_all_pages<T>(&self, endpoint: &str, items_key: &str, extra: &[(&str, String)]) -> Result<Vec<T>>
  where
    T: DeserializeOwned,
  {
    let mut out: Vec<T> = Vec::new();
    let mut page: u32 = 1;

    loop {
      let mut query: Vec<(&str, String)> = vec![("page", page.to_string()), ("per_page", self.per_page.to_string())];
      query.extend(extra.iter().cloned());

      let body = self
        .api
        .get_json(endpoint, &query)
        .with_context(|| format!("fetching {} page {}", endpoint, page))?;

      if !body.fetch("pagination").exists() || body.fetch("pagination.total_entries").to::<u64>() == Some(0) {
        break;
      }

      let items = body
        .fetch(items_key)
        .list::<T>()
        .map_err(|reason| ReportError::Payload {
          endpoint: format!("{} page {}", endpoint, page),
          reason: format!("{}: {}", items_key, reason),
        })?;

      debug!(endpoint, page, items = items.len(), "page fetched");
      out.extend(items);

      if body.fetch("pagination.next_page").is_null() {
        break;
      }
      page += 1;
    }

    Ok(out)
  }

  pub fn projects(&self) -> Result<Vec<Project>> {
    self.fetch_all_pages("/projects.json", "projects", &[])
  }

  pub fn suites(&self, project_id: u64) -> Result<Vec<Suite>> {
    self.fetch_all_pages(&format!("/projects/{}/suites.json", project_id), "suites", &[])
  }

  pub fn steps(&self, project_id: u64, suite_id: u64) -> Result<Vec<Step>> {
    self.fetch_all_pages(
      &format!("/projects/{}/suites/{}/steps.json", project_id, suite_id),
      "steps",
      &[],
    )
  }

  pub fn runs(&self, project_id: u64) -> Result<Vec<Run>> {
    self.fetch_all_pages(&format!("/projects/{}/runs.json", project_id), "runs", &[])
  }

  pub fn users(&self) -> Result<Vec<User>> {
    self.fetch_all_pages("/users.json", "users", &[])
  }
}
