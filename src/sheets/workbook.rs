// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: In-memory workbook implementing SpreadsheetPort, persisted as a JSON file
// role: sheets/storage
// inputs: Workbook JSON ({"sheets": {"Name": [[cell, ...], ...]}}); A1 ranges
// outputs: Range reads, in-place writes/clears/sorts, atomic save to disk
// side_effects: load reads a file; save writes <path>.tmp then renames over <path>
// invariants:
// - Writing to or reading from an unknown sheet is an error (sheets are never created implicitly)
// - Ragged rows are padded with Empty cells only where a write lands
// errors: ReportError::SheetNotFound; IO/JSON errors carry the file path
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::range::A1Range;
use super::{Cell, Row, SpreadsheetPort};
use crate::error::ReportError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
  #[serde(default)]
  sheets: BTreeMap<String, Vec<Row>>,
}

impl Workbook {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_sheet(mut self, name: &str, rows: Vec<Row>) -> Self {
    self.sheets.insert(name.to_string(), rows);
    self
  }

  pub fn load(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading workbook {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing workbook {}", path.display()))
  }

  pub fn save(&self, path: &Path) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_vec_pretty(self)?).with_context(|| format!("writing {}", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| format!("replacing workbook {}", path.display()))?;

    Ok(())
  }

  pub fn sheet(&self, name: &str) -> Result<&Vec<Row>> {
    self
      .sheets
      .get(name)
      .ok_or_else(|| ReportError::SheetNotFound(name.to_string()).into())
  }

  fn sheet_mut(&mut self, name: &str) -> Result<&mut Vec<Row>> {
    self
      .sheets
      .get_mut(name)
      .ok_or_else(|| ReportError::SheetNotFound(name.to_string()).into())
  }
}

fn trim_trailing_blank_rows(rows: &mut Vec<Row>) {
  while rows.last().map(|r| r.iter().all(Cell::is_blank)).unwrap_or(false) {
    rows.pop();
  }
}

fn set_cell(rows: &mut Vec<Row>, row: usize, col: usize, value: Cell) {
  if rows.len() < row {
    rows.resize_with(row, Vec::new);
  }
  let r = &mut rows[row - 1];

  if r.len() < col {
    r.resize(col, Cell::Empty);
  }
  r[col - 1] = value;
}

impl SpreadsheetPort for Workbook {
  fn read_range(&self, range: &A1Range) -> Result<Vec<Row>> {
    let rows = self.sheet(&range.sheet)?;
    let end_row = range.resolved_end_row(self.last_row(&range.sheet)?);

    let mut out: Vec<Row> = (range.start_row..=end_row)
      .map(|r| {
        (range.start_col..=range.end_col)
          .map(|c| {
            rows
              .get(r - 1)
              .and_then(|row| row.get(c - 1))
              .cloned()
              .unwrap_or_default()
          })
          .collect()
      })
      .collect();

    trim_trailing_blank_rows(&mut out);

    Ok(out)
  }

  fn last_row(&self, sheet: &str) -> Result<usize> {
    let rows = self.sheet(sheet)?;

    Ok(
      rows
        .iter()
        .rposition(|r| r.iter().any(|c| !c.is_blank()))
        .map(|i| i + 1)
        .unwrap_or(0),
    )
  }

  fn clear_range(&mut self, range: &A1Range) -> Result<()> {
    let last = self.last_row(&range.sheet)?;
    let end_row = range.resolved_end_row(last);
    let rows = self.sheet_mut(&range.sheet)?;

    for r in range.start_row..=end_row.min(rows.len()) {
      let row = &mut rows[r - 1];
      for c in range.start_col..=range.end_col.min(row.len()) {
        row[c - 1] = Cell::Empty;
      }
    }
    trim_trailing_blank_rows(rows);

    Ok(())
  }

  fn write_rows(&mut self, sheet: &str, start_row: usize, start_col: usize, values: &[Row]) -> Result<()> {
    let rows = self.sheet_mut(sheet)?;

    for (i, row) in values.iter().enumerate() {
      for (j, cell) in row.iter().enumerate() {
        set_cell(rows, start_row + i, start_col + j, cell.clone());
      }
    }

    Ok(())
  }

  fn sort_range(&mut self, range: &A1Range, column: usize, descending: bool) -> Result<()> {
    if column < range.start_col || column > range.end_col {
      anyhow::bail!("sort column {} lies outside {}", column, range);
    }

    let mut block = self.read_range(range)?;
    let key = column - range.start_col;

    block.iter_mut().for_each(|r| r.resize(range.width(), Cell::Empty));
    block.sort_by(|a, b| match (a[key].is_blank(), b[key].is_blank()) {
      (true, true) => Ordering::Equal,
      (true, false) => Ordering::Greater,
      (false, true) => Ordering::Less,
      (false, false) if descending => b[key].sort_cmp(&a[key]),
      (false, false) => a[key].sort_cmp(&b[key]),
    });

    self.write_rows(&range.sheet, range.start_row, range.start_col, &block)
  }

  fn append_row(&mut self, sheet: &str, row: Row) -> Result<()> {
    let next = self.last_row(sheet)? + 1;
    self.write_rows(sheet, next, 1, &[row])
  }
}
