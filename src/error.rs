// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed failure taxonomy (configuration, payload, data) carried through anyhow chains
// role: errors/taxonomy
// outputs: ReportError variants with operator-facing messages
// invariants: Messages name the offending sheet, range, endpoint or value
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
  #[error("Sheet not found: {0}")]
  SheetNotFound(String),

  #[error("invalid range {range:?}: {reason}")]
  InvalidRange { range: String, reason: String },

  #[error("{0} data is empty or could not be retrieved")]
  EmptyLookup(String),

  #[error("missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid date input. Given: start - {start}, end - {end}")]
  InvalidDateInput { start: String, end: String },

  #[error("unexpected payload from {endpoint}: {reason}")]
  Payload { endpoint: String, reason: String },
}
