// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed TestLodge records parsed at the HTTP boundary plus the report row shapes built from them
// role: model/types
// outputs: Project, Suite, Step, Run, User (API); ProjectSummary, ChangelogRow (reports)
// invariants: API timestamps are RFC3339 and normalized to UTC; optional API fields (step timestamps included) default instead of failing
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::sheets::{Cell, Row};
use crate::util::{display_datetime, sheet_datetime};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
  pub id: u64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

impl Project {
  /// `"<id> | <name>"`, the project column of the changelog.
  pub fn label(&self) -> String {
    format!("{} | {}", self.id, self.name)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
  pub id: u64,
  #[serde(default)]
  pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
  pub id: u64,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub step_number: Option<u64>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub last_saved_by_id: Option<u64>,
}

impl Step {
  pub fn title(&self) -> &str {
    self.title.as_deref().unwrap_or("")
  }

  pub fn number_label(&self) -> String {
    self.step_number.map(|n| n.to_string()).unwrap_or_default()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
  pub id: u64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub project_id: Option<u64>,
  #[serde(default)]
  pub passed_number: u64,
  #[serde(default)]
  pub failed_number: u64,
  #[serde(default)]
  pub incomplete_number: u64,
  #[serde(default)]
  pub skipped_number: u64,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: u64,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub firstname: String,
  #[serde(default)]
  pub lastname: String,
}

/// Per-tag step totals for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCounts {
  pub total: usize,
  pub core: usize,
  pub automated: usize,
  pub core_and_automated: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
  pub id: u64,
  pub name: String,
  pub created_at: Option<DateTime<Utc>>,
  pub squad: String,
  pub suite_count: usize,
  pub counts: TagCounts,
}

impl ProjectSummary {
  pub fn to_row(&self, tz: &Tz) -> Row {
    vec![
      Cell::from(self.id),
      Cell::from(self.name.clone()),
      Cell::from(self.created_at.map(|d| sheet_datetime(&d, tz)).unwrap_or_default()),
      Cell::from(self.squad.clone()),
      Cell::from(self.counts.total),
      Cell::from(self.counts.core),
      Cell::from(self.counts.automated),
      Cell::from(self.counts.core_and_automated),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogRow {
  pub id: String,
  pub date: DateTime<Utc>,
  pub project: String,
  pub squad: String,
  pub author: String,
  pub action: String,
  pub detail: String,
}

pub const TOOL_NAME: &str = "testlodge";

impl ChangelogRow {
  pub fn to_row(&self, tz: &Tz) -> Row {
    vec![
      Cell::from(self.id.clone()),
      Cell::from(sheet_datetime(&self.date, tz)),
      Cell::from(TOOL_NAME),
      Cell::from(self.project.clone()),
      Cell::from(self.squad.clone()),
      Cell::from(self.author.clone()),
      Cell::from(self.action.clone()),
      Cell::from(self.detail.clone()),
    ]
  }
}

/// Run detail column: counts plus the run date in `dd/mm/yyyy hh:mm`.
pub fn run_detail(project: &Project, run: &Run, tz: &Tz) -> String {
  format!(
    "{} | {} | Passaram: {}, Incompletos: {}, Ignorados: {}, Falharam: {} | {}",
    project.name,
    run.name,
    run.passed_number,
    run.incomplete_number,
    run.skipped_number,
    run.failed_number,
    display_datetime(&run.created_at, tz)
  )
}
