// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse and render A1-notation ranges (Sheet!A2:B, Sheet!B2, 'My Sheet'!A1:H10)
// role: sheets/addressing
// inputs: Range strings from configuration; explicit coordinates from the writer
// outputs: A1Range with 1-based rows/columns; open-ended ranges keep end_row = None
// invariants: start <= end on both axes; sheet name never empty
// errors: ReportError::InvalidRange naming the raw input
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::ReportError;

static RE_CELL: Lazy<regex::Regex> = Lazy::new(|| regex::Regex::new(r"^([A-Za-z]{1,3})(\d*)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
  pub sheet: String,
  pub start_row: usize,
  pub start_col: usize,
  /// `None` for open-ended ranges such as `A2:B` (runs to the sheet's last row).
  pub end_row: Option<usize>,
  pub end_col: usize,
}

impl A1Range {
  pub fn new(sheet: &str, start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
    Self {
      sheet: sheet.to_string(),
      start_row,
      start_col,
      end_row: Some(end_row),
      end_col,
    }
  }

  pub fn width(&self) -> usize {
    self.end_col - self.start_col + 1
  }

  /// Resolve the last row, using the sheet's last populated row for open-ended ranges.
  pub fn resolved_end_row(&self, sheet_last_row: usize) -> usize {
    self.end_row.unwrap_or(sheet_last_row)
  }
}

fn invalid(raw: &str, reason: &str) -> ReportError {
  ReportError::InvalidRange {
    range: raw.to_string(),
    reason: reason.to_string(),
  }
}

pub fn column_index(letters: &str) -> usize {
  letters
    .bytes()
    .fold(0, |acc, b| acc * 26 + (b.to_ascii_uppercase() - b'A') as usize + 1)
}

pub fn column_letters(mut index: usize) -> String {
  let mut out = Vec::new();

  while index > 0 {
    let rem = (index - 1) % 26;
    out.push(b'A' + rem as u8);
    index = (index - 1) / 26;
  }
  out.reverse();

  String::from_utf8_lossy(&out).to_string()
}

fn parse_cell(raw: &str, part: &str) -> Result<(usize, Option<usize>), ReportError> {
  let caps = RE_CELL
    .captures(part)
    .ok_or_else(|| invalid(raw, &format!("cannot read cell reference {:?}", part)))?;

  let col = column_index(&caps[1]);
  let row = match &caps[2] {
    "" => None,
    digits => {
      let n: usize = digits.parse().map_err(|_| invalid(raw, "row number out of range"))?;
      if n == 0 {
        return Err(invalid(raw, "rows are numbered from 1"));
      }
      Some(n)
    }
  };

  Ok((col, row))
}

impl FromStr for A1Range {
  type Err = ReportError;

  fn from_str(raw: &str) -> Result<Self, Self::Err> {
    let (sheet, cells) = raw
      .trim()
      .rsplit_once('!')
      .ok_or_else(|| invalid(raw, "expected <sheet>!<cells>"))?;

    let sheet = sheet.trim().trim_matches('\'');

    if sheet.is_empty() {
      return Err(invalid(raw, "missing sheet name"));
    }

    let (start, end) = match cells.split_once(':') {
      Some((a, b)) => (a, Some(b)),
      None => (cells, None),
    };

    let (start_col, start_row) = parse_cell(raw, start)?;
    let start_row = start_row.unwrap_or(1);

    let (end_col, end_row) = match end {
      Some(e) => parse_cell(raw, e)?,
      None => (start_col, Some(start_row)),
    };

    if end_col < start_col || end_row.map(|r| r < start_row).unwrap_or(false) {
      return Err(invalid(raw, "range end precedes its start"));
    }

    Ok(Self {
      sheet: sheet.to_string(),
      start_row,
      start_col,
      end_row,
      end_col,
    })
  }
}

impl fmt::Display for A1Range {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}!{}{}:{}",
      self.sheet,
      column_letters(self.start_col),
      self.start_row,
      column_letters(self.end_col)
    )?;

    if let Some(r) = self.end_row {
      write!(f, "{}", r)?;
    }

    Ok(())
  }
}
