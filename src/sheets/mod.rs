// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Spreadsheet seam: cell values, the SpreadsheetPort trait and its workbook/writer/log helpers
// role: sheets/namespace
// outputs: Cell, Row, SpreadsheetPort; submodules range, workbook, writer, log
// invariants: Rows and columns are 1-based at the trait boundary
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cmp::Ordering;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod log;
pub mod range;
pub mod workbook;
pub mod writer;

use range::A1Range;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
  Number(f64),
  Bool(bool),
  Text(String),
  #[default]
  Empty,
}

pub type Row = Vec<Cell>;

/// Whole number that converts to i64 without saturating.
fn whole_i64(n: f64) -> bool {
  const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
  n.fract() == 0.0 && (-LIMIT..LIMIT).contains(&n)
}

impl Cell {
  /// Empty cells and blank strings both read as "nothing here".
  pub fn is_blank(&self) -> bool {
    match self {
      Cell::Empty => true,
      Cell::Text(s) => s.trim().is_empty(),
      _ => false,
    }
  }

  /// String form used for map keys: numeric cells holding whole numbers drop the
  /// fractional part so `12` and `"12"` key identically.
  pub fn as_key(&self) -> String {
    match self {
      Cell::Number(n) if whole_i64(*n) => format!("{}", *n as i64),
      Cell::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{:.0}", n),
      Cell::Number(n) => n.to_string(),
      Cell::Bool(b) => b.to_string(),
      Cell::Text(s) => s.trim().to_string(),
      Cell::Empty => String::new(),
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Cell::Number(n) if whole_i64(*n) => Some(*n as i64),
      Cell::Text(s) => s.trim().parse().ok(),
      _ => None,
    }
  }

  fn kind_rank(&self) -> u8 {
    match self {
      Cell::Number(_) => 0,
      Cell::Text(_) => 1,
      Cell::Bool(_) => 2,
      Cell::Empty => 3,
    }
  }

  /// Ascending comparison for sorting: numbers before text before booleans.
  pub fn sort_cmp(&self, other: &Cell) -> Ordering {
    match (self, other) {
      (Cell::Number(a), Cell::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
      (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
      (Cell::Bool(a), Cell::Bool(b)) => a.cmp(b),
      _ => self.kind_rank().cmp(&other.kind_rank()),
    }
  }
}

impl From<&str> for Cell {
  fn from(s: &str) -> Self {
    Cell::Text(s.to_string())
  }
}

impl From<String> for Cell {
  fn from(s: String) -> Self {
    Cell::Text(s)
  }
}

impl From<u64> for Cell {
  fn from(n: u64) -> Self {
    Cell::Number(n as f64)
  }
}

impl From<usize> for Cell {
  fn from(n: usize) -> Self {
    Cell::Number(n as f64)
  }
}

impl From<f64> for Cell {
  fn from(n: f64) -> Self {
    Cell::Number(n)
  }
}

/// Host spreadsheet operations the reports need.
pub trait SpreadsheetPort {
  /// Values in `range`, with trailing all-blank rows dropped.
  fn read_range(&self, range: &A1Range) -> Result<Vec<Row>>;

  /// Last row holding any non-blank cell (0 for an empty sheet).
  fn last_row(&self, sheet: &str) -> Result<usize>;

  fn clear_range(&mut self, range: &A1Range) -> Result<()>;

  fn write_rows(&mut self, sheet: &str, start_row: usize, start_col: usize, rows: &[Row]) -> Result<()>;

  /// Stable sort of the rows inside `range` by the absolute sheet `column`.
  fn sort_range(&mut self, range: &A1Range, column: usize, descending: bool) -> Result<()>;

  fn append_row(&mut self, sheet: &str, row: Row) -> Result<()>;

  fn read_cell(&self, range: &A1Range) -> Result<Cell> {
    let rows = self.read_range(range)?;
    Ok(rows.into_iter().next().and_then(|r| r.into_iter().next()).unwrap_or_default())
  }
}
