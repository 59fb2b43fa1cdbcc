// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Report entry points: assemble lookups, aggregate API data, and write the summary or changelog sheet
// role: orchestration/report
// inputs: EffectiveConfig, TestLodgeApi, SpreadsheetPort, effective now
// outputs: Rewritten report sheet; number of data rows written
// side_effects: API calls; sheet mutation only after every row has been built; tracing timing logs
// invariants:
// - The datespan flag beats the workbook's datespan cell
// - A failure before the write step leaves the sheet untouched
// errors: Lookup, fetch and write errors propagate with the stage as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::aggregate::{collect_changelog, summarize_projects};
use crate::cli::EffectiveConfig;
use crate::lookup::{SquadMap, UserMap, UserOverrides};
use crate::sheets::writer::{CHANGELOG_HEADER, ReportSheet, SUMMARY_HEADER, write_report};
use crate::sheets::{Row, SpreadsheetPort};
use crate::testlodge::api::TestLodgeApi;
use crate::testlodge::paginate::Paginator;
use crate::util::describe_elapsed;
use crate::window::ChangeWindow;

fn read_datespan(cfg: &EffectiveConfig, port: &dyn SpreadsheetPort) -> Result<i64> {
  let cell = port
    .read_cell(&cfg.datespan_cell)
    .with_context(|| format!("reading datespan from {}", cfg.datespan_cell))?;

  cell
    .as_i64()
    .ok_or_else(|| anyhow!("datespan cell {} must hold a whole number of days, found {:?}", cfg.datespan_cell, cell))
}

pub fn generate_changelog(
  cfg: &EffectiveConfig,
  api: &dyn TestLodgeApi,
  port: &mut dyn SpreadsheetPort,
  now: DateTime<Utc>,
  datespan_override: Option<i64>,
) -> Result<usize> {
  let started = Instant::now();

  let datespan = match datespan_override {
    Some(days) => days,
    None => read_datespan(cfg, port)?,
  };
  let window = ChangeWindow::looking_back(now, datespan)?;
  info!(sheet = %cfg.changelog_sheet, datespan, start = %window.start, end = %window.end, "generating changelog");

  let squads = SquadMap::load(port, &cfg.squads_range)?;
  let overrides = UserOverrides::load(port, &cfg.overrides_range)?;

  let pager = Paginator::new(api, cfg.api.page_size);
  let users = pager.users().context("listing users")?;
  let user_map = UserMap::build(&users, &overrides);

  let events = collect_changelog(&pager, &squads, &user_map, &window, &cfg.tz)?;
  let rows: Vec<Row> = events.iter().map(|e| e.to_row(&cfg.tz)).collect();

  let target = ReportSheet {
    sheet: &cfg.changelog_sheet,
    header: &CHANGELOG_HEADER,
    sort_column: Some(cfg.changelog_sort_column),
  };
  let written = write_report(port, &target, &rows).context("writing changelog")?;

  info!("Execution completed in {}", describe_elapsed(started.elapsed()));
  Ok(written)
}

pub fn generate_project_summary(cfg: &EffectiveConfig, api: &dyn TestLodgeApi, port: &mut dyn SpreadsheetPort) -> Result<usize> {
  let started = Instant::now();
  info!(sheet = %cfg.summary_sheet, "generating project summary");

  let squads = SquadMap::load(port, &cfg.squads_range)?;
  let pager = Paginator::new(api, cfg.api.page_size);

  let summaries = summarize_projects(&pager, &squads)?;
  let rows: Vec<Row> = summaries.iter().map(|s| s.to_row(&cfg.tz)).collect();

  let target = ReportSheet {
    sheet: &cfg.summary_sheet,
    header: &SUMMARY_HEADER,
    sort_column: Some(cfg.summary_sort_column),
  };
  let written = write_report(port, &target, &rows).context("writing project summary")?;

  info!("Execution completed in {}", describe_elapsed(started.elapsed()));
  Ok(written)
}
