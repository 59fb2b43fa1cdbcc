// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Best-effort diagnostic log rows (timestamp, function, message, context) in a log sheet
// role: sheets/diagnostics
// inputs: SpreadsheetPort, log sheet name, caller-supplied context JSON
// outputs: true when the row landed
// side_effects: Appends one row to the log sheet
// invariants: Never propagates failures; a failed append is reported via tracing::warn
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

use super::{Cell, SpreadsheetPort};

pub fn log_event(
  port: &mut dyn SpreadsheetPort,
  log_sheet: &str,
  function: &str,
  message: &str,
  context: &serde_json::Value,
  at: DateTime<Utc>,
) -> bool {
  let row = vec![
    Cell::from(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    Cell::from(function),
    Cell::from(message),
    Cell::from(context.to_string()),
  ];

  match port.append_row(log_sheet, row) {
    Ok(()) => true,
    Err(e) => {
      warn!(sheet = log_sheet, function, error = %e, "could not record diagnostic log entry");
      false
    }
  }
}
