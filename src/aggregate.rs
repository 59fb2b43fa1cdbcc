// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Walk projects → suites → steps → runs and build summary totals and changelog rows
// role: aggregation/core
// inputs: Paginator (API), SquadMap, UserMap, ChangeWindow, report timezone
// outputs: Vec<ProjectSummary>; Vec<ChangelogRow> in discovery order
// side_effects: Sequential API calls via the paginator
// invariants:
// - Tags match case-insensitively as substrings; a step tagged with both bumps core, automated and combined once each
// - Step events: one row for creation and one for update when each falls inside the window
// - Run rows are authored by the project's last named step updater seen during the walk (empty when none)
// - Steps without created_at emit no creation row
// errors: Any fetch failure aborts the whole aggregation
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::lookup::{SquadMap, UserMap};
use crate::model::{ChangelogRow, Project, ProjectSummary, Run, Step, TagCounts, run_detail};
use crate::testlodge::paginate::Paginator;
use crate::window::ChangeWindow;

pub const CORE_TAG: &str = "[core]";
pub const AUTOMATED_TAG: &str = "[automatizado]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTags {
  pub core: bool,
  pub automated: bool,
}

pub fn classify_title(title: &str) -> StepTags {
  let lower = title.to_lowercase();

  StepTags {
    core: lower.contains(CORE_TAG),
    automated: lower.contains(AUTOMATED_TAG),
  }
}

impl TagCounts {
  pub fn tally(&mut self, title: &str) {
    let tags = classify_title(title);

    self.total += 1;
    if tags.core {
      self.core += 1;
    }
    if tags.automated {
      self.automated += 1;
    }
    if tags.core && tags.automated {
      self.core_and_automated += 1;
    }
  }
}

pub fn summarize_projects(pager: &Paginator<'_>, squads: &SquadMap) -> Result<Vec<ProjectSummary>> {
  let projects = pager.projects().context("listing projects")?;
  let mut out = Vec::with_capacity(projects.len());

  for project in projects {
    let suites = pager.suites(project.id)?;
    let mut counts = TagCounts::default();

    for suite in &suites {
      for step in pager.steps(project.id, suite.id)? {
        counts.tally(step.title());
      }
    }

    debug!(project = project.id, suites = suites.len(), steps = counts.total, "project summarized");

    out.push(ProjectSummary {
      id: project.id,
      squad: squads.squad_for(project.id).to_string(),
      name: project.name,
      created_at: project.created_at,
      suite_count: suites.len(),
      counts,
    });
  }

  Ok(out)
}

/// Everything a changelog row needs that is fixed per project.
struct ProjectContext<'a> {
  project: &'a Project,
  label: String,
  squad: &'a str,
  tz: &'a Tz,
}

impl ProjectContext<'_> {
  fn row(&self, id: u64, date: DateTime<Utc>, author: &str, action: String, detail: String) -> ChangelogRow {
    ChangelogRow {
      id: format!("testlodge-{}", id),
      date,
      project: self.label.clone(),
      squad: self.squad.to_string(),
      author: author.to_string(),
      action,
      detail,
    }
  }

  fn step_events(&self, step: &Step, author: &str, window: &ChangeWindow) -> Vec<ChangelogRow> {
    let number = step.number_label();
    let detail = format!("Caso de teste: {} | {}", number, step.title());
    let mut rows = Vec::new();

    if let Some(created) = step.created_at.filter(|c| window.contains(c)) {
      rows.push(self.row(
        step.id,
        created,
        author,
        format!("Caso de teste {} criado", number),
        detail.clone(),
      ));
    }

    if let Some(updated) = step.updated_at.filter(|u| window.contains(u)) {
      rows.push(self.row(
        step.id,
        updated,
        author,
        format!("Caso de teste {} atualizado", number),
        detail,
      ));
    }

    rows
  }

  fn run_event(&self, run: &Run, last_updater: &str, window: &ChangeWindow) -> Option<ChangelogRow> {
    if !window.contains(&run.created_at) {
      return None;
    }

    Some(self.row(
      run.id,
      run.created_at,
      last_updater,
      format!("Regressão realizada: {}", self.project.name),
      run_detail(self.project, run, self.tz),
    ))
  }
}

pub fn collect_changelog(
  pager: &Paginator<'_>,
  squads: &SquadMap,
  users: &UserMap,
  window: &ChangeWindow,
  tz: &Tz,
) -> Result<Vec<ChangelogRow>> {
  let projects = pager.projects().context("listing projects")?;
  let mut out = Vec::new();

  for project in &projects {
    let ctx = ProjectContext {
      project,
      label: project.label(),
      squad: squads.squad_for(project.id),
      tz,
    };
    let mut last_updater: Option<&str> = None;
    let before = out.len();

    for suite in pager.suites(project.id)? {
      for step in pager.steps(project.id, suite.id)? {
        let author = users.name_for(step.last_saved_by_id);

        out.extend(ctx.step_events(&step, author.unwrap_or(""), window));

        if author.is_some_and(|a| !a.is_empty()) {
          last_updater = author;
        }
      }
    }

    for run in pager.runs(project.id)? {
      out.extend(ctx.run_event(&run, last_updater.unwrap_or(""), window));
    }

    debug!(project = project.id, rows = out.len() - before, "project changelog collected");
  }

  Ok(out)
}
