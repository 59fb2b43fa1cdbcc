// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Replace a report sheet's contents: clear old rows, write header, write rows, sort
// role: sheets/writer
// inputs: SpreadsheetPort, target sheet layout (name, header, sort column), fully assembled rows
// outputs: Number of data rows written
// side_effects: Mutates the target sheet through the port
// invariants:
// - Header lands on row 1; data starts on row 2
// - Every row has exactly header.len() cells (checked before anything is cleared)
// - Sort touches only the freshly written data block
// errors: Port errors propagate; width mismatches bail before mutation
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Result, bail};
use tracing::{debug, info};

use super::range::A1Range;
use super::{Cell, Row, SpreadsheetPort};

pub const CHANGELOG_HEADER: [&str; 8] = [
  "Test Run ID",
  "Test Run Date",
  "Tool",
  "Project ID | Name",
  "Squad",
  "Author",
  "Action",
  "Detail",
];

pub const SUMMARY_HEADER: [&str; 8] = [
  "Project ID",
  "Project Name",
  "Created At",
  "Squad",
  "Total Test Cases",
  "Core Test Cases",
  "Automated Test Cases",
  "Core & Automated Test Cases",
];

#[derive(Debug, Clone)]
pub struct ReportSheet<'a> {
  pub sheet: &'a str,
  pub header: &'a [&'a str],
  /// 1-based column to sort descending by; `None` keeps insertion order.
  pub sort_column: Option<usize>,
}

pub fn write_report(port: &mut dyn SpreadsheetPort, target: &ReportSheet<'_>, rows: &[Row]) -> Result<usize> {
  let width = target.header.len();

  if let Some((i, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
    bail!(
      "row {} for sheet {:?} has {} cells, expected {}",
      i + 1,
      target.sheet,
      bad.len(),
      width
    );
  }

  if let Some(col) = target.sort_column {
    if col == 0 || col > width {
      bail!("sort column {} is outside the {} report columns", col, width);
    }
  }

  let last = port.last_row(target.sheet)?;

  if last >= 2 {
    let stale = A1Range::new(target.sheet, 2, 1, last, width);
    debug!(range = %stale, "clearing previous report rows");
    port.clear_range(&stale)?;
  }

  let header: Row = target.header.iter().map(|h| Cell::from(*h)).collect();
  port.write_rows(target.sheet, 1, 1, &[header])?;

  if rows.is_empty() {
    info!(sheet = target.sheet, "no rows to write; header only");
    return Ok(0);
  }

  port.write_rows(target.sheet, 2, 1, rows)?;

  if let Some(col) = target.sort_column {
    let block = A1Range::new(target.sheet, 2, 1, rows.len() + 1, width);
    port.sort_range(&block, col, true)?;
  }

  info!(sheet = target.sheet, rows = rows.len(), "report written");

  Ok(rows.len())
}
