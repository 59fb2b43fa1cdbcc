// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run one subcommand end to end: load the workbook, pick the API backend, call the entry point, save, print a pointer
// role: processing/orchestrator
// inputs: EffectiveConfig, parsed Command
// outputs: JSON pointer or result on stdout ({sheet, rows, workbook} for reports; hours for durations)
// side_effects: Reads and atomically rewrites the workbook file; network calls through the selected API
// invariants:
// - The workbook is saved once, only after the entry point succeeded
// - duration/durations never touch the workbook or the API
// errors: Propagates load/generate/save errors with file path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::{Command, EffectiveConfig};
use crate::duration::{Marker, WorkCalendar};
use crate::report::{generate_changelog, generate_project_summary};
use crate::sheets::log::log_event;
use crate::sheets::workbook::Workbook;
use crate::testlodge::api::build_api;
use crate::util::effective_now;

pub fn dispatch(cfg: &EffectiveConfig, command: &Command) -> Result<()> {
  match command {
    Command::Changelog { datespan } => run_changelog(cfg, *datespan),
    Command::Summary => run_summary(cfg),
    Command::Duration { start, end } => run_duration(cfg, start, end),
    Command::Durations { markers } => run_durations(cfg, markers),
    Command::Log { function, message, context } => run_log(cfg, function, message, context.as_deref()),
  }
}

fn print_pointer(sheet: &str, rows: usize, workbook: &Path) {
  let pointer = json!({ "sheet": sheet, "rows": rows, "workbook": workbook.display().to_string() });
  println!("{}", pointer);
}

pub fn run_changelog(cfg: &EffectiveConfig, datespan: Option<i64>) -> Result<()> {
  let path = cfg.require_workbook()?;
  let mut workbook = Workbook::load(path)?;
  let api = build_api(cfg)?;

  let rows = generate_changelog(cfg, api.as_ref(), &mut workbook, effective_now(cfg.now_override), datespan)?;
  workbook.save(path)?;

  print_pointer(&cfg.changelog_sheet, rows, path);
  Ok(())
}

pub fn run_summary(cfg: &EffectiveConfig) -> Result<()> {
  let path = cfg.require_workbook()?;
  let mut workbook = Workbook::load(path)?;
  let api = build_api(cfg)?;

  let rows = generate_project_summary(cfg, api.as_ref(), &mut workbook)?;
  workbook.save(path)?;

  print_pointer(&cfg.summary_sheet, rows, path);
  Ok(())
}

fn calendar(cfg: &EffectiveConfig) -> WorkCalendar {
  WorkCalendar::new(cfg.holidays.iter().copied(), cfg.tz)
}

pub fn run_duration(cfg: &EffectiveConfig, start: &str, end: &str) -> Result<()> {
  let hours = calendar(cfg).duration_between(start, end)?;
  println!("{}", json!({ "start": start, "end": end, "hours": hours }));
  Ok(())
}

pub fn run_durations(cfg: &EffectiveConfig, markers_path: &Path) -> Result<()> {
  let raw = std::fs::read_to_string(markers_path)
    .with_context(|| format!("reading markers {}", markers_path.display()))?;
  let markers: Vec<Marker> =
    serde_json::from_str(&raw).with_context(|| format!("parsing markers {}", markers_path.display()))?;

  let hours = calendar(cfg).batch(&markers)?;
  println!("{}", json!({ "durations": hours }));
  Ok(())
}

pub fn run_log(cfg: &EffectiveConfig, function: &str, message: &str, context: Option<&str>) -> Result<()> {
  let context: serde_json::Value = match context {
    Some(raw) => serde_json::from_str(raw).with_context(|| format!("--context is not valid JSON: {}", raw))?,
    None => json!({}),
  };

  let path = cfg.require_workbook()?;
  let mut workbook = Workbook::load(path)?;

  if log_event(&mut workbook, &cfg.log_sheet, function, message, &context, effective_now(cfg.now_override)) {
    workbook.save(path)?;
    print_pointer(&cfg.log_sheet, 1, path);
  } else {
    print_pointer(&cfg.log_sheet, 0, path);
  }

  Ok(())
}
