// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build the per-run lookup tables: project→squad, username overrides, user id→display name
// role: lookup/builders
// inputs: Two-column spreadsheet ranges; API users
// outputs: SquadMap, UserOverrides, UserMap (read-only after construction)
// invariants:
// - Squad keys are string-coerced ids, so numeric 12 and "12" resolve alike; first row wins on duplicates
// - Override lookup is case-insensitive at query time, in sheet order; keys are stored as written
// - Users without an override (or whose override name is blank) display as "<first> <last>*"
// errors: ReportError::EmptyLookup when the squad range holds no rows; port errors propagate
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::error::ReportError;
use crate::model::User;
use crate::sheets::range::A1Range;
use crate::sheets::{Row, SpreadsheetPort};

/// Rows whose first cell is blank carry no key.
fn keyed_pairs(rows: &[Row]) -> impl Iterator<Item = (String, String)> + '_ {
  rows.iter().filter_map(|r| {
    let key = r.first()?;
    if key.is_blank() {
      return None;
    }
    let value = r.get(1).map(|c| c.as_key()).unwrap_or_default();
    Some((key.as_key(), value))
  })
}

#[derive(Debug, Clone, Default)]
pub struct SquadMap {
  by_project: HashMap<String, String>,
}

impl SquadMap {
  pub fn from_rows(rows: &[Row]) -> Result<Self> {
    let mut by_project = HashMap::new();

    for (id, squad) in keyed_pairs(rows) {
      by_project.entry(id).or_insert(squad);
    }

    if by_project.is_empty() {
      return Err(ReportError::EmptyLookup("TestLodge squad mapping".into()).into());
    }

    Ok(Self { by_project })
  }

  pub fn load(port: &dyn SpreadsheetPort, range: &A1Range) -> Result<Self> {
    let rows = port.read_range(range).with_context(|| format!("reading squad mapping {}", range))?;
    let map = Self::from_rows(&rows).with_context(|| format!("building squad mapping from {}", range))?;
    debug!(projects = map.len(), "squad mapping loaded");

    Ok(map)
  }

  pub fn get(&self, project_id: &str) -> Option<&str> {
    self.by_project.get(project_id).map(String::as_str)
  }

  /// Squad label for a project; empty when unmapped.
  pub fn squad_for(&self, project_id: u64) -> &str {
    self.get(&project_id.to_string()).unwrap_or("")
  }

  pub fn len(&self) -> usize {
    self.by_project.len()
  }
}

#[derive(Debug, Clone, Default)]
pub struct UserOverrides {
  entries: Vec<(String, String)>,
}

impl UserOverrides {
  pub fn from_rows(rows: &[Row]) -> Self {
    Self {
      entries: keyed_pairs(rows).collect(),
    }
  }

  pub fn load(port: &dyn SpreadsheetPort, range: &A1Range) -> Result<Self> {
    let rows = port.read_range(range).with_context(|| format!("reading user overrides {}", range))?;
    let overrides = Self::from_rows(&rows);

    if overrides.entries.is_empty() {
      warn!(%range, "user override table is empty; every author falls back to the API name");
    }

    Ok(overrides)
  }

  /// First entry whose key matches `username` ignoring case.
  pub fn lookup(&self, username: &str) -> Option<&str> {
    if username.is_empty() {
      return None;
    }
    let wanted = username.to_lowercase();

    self
      .entries
      .iter()
      .find(|(k, _)| k.to_lowercase() == wanted)
      .map(|(_, v)| v.as_str())
  }
}

#[derive(Debug, Clone, Default)]
pub struct UserMap {
  names: HashMap<u64, String>,
}

impl UserMap {
  pub fn build(users: &[User], overrides: &UserOverrides) -> Self {
    let names = users
      .iter()
      .map(|u| {
        let name = u
          .email
          .as_deref()
          .and_then(|e| overrides.lookup(e))
          .filter(|n| !n.trim().is_empty())
          .map(str::to_string)
          .unwrap_or_else(|| format!("{} {}*", u.firstname, u.lastname));
        (u.id, name)
      })
      .collect();

    Self { names }
  }

  pub fn name_for(&self, user_id: Option<u64>) -> Option<&str> {
    user_id.and_then(|id| self.names.get(&id)).map(String::as_str)
  }
}
