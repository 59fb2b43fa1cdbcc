// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for time formatting/parsing in the report timezone, run timing, and man page rendering
// role: utilities/helpers
// inputs: DateTime<Utc>; timestamp strings; chrono_tz::Tz; clap CommandFactory
// outputs: Sheet/display timestamps, local naive timestamps, elapsed-time phrases, man page text
// invariants:
// - sheet_datetime sorts lexically in chronological order
// - parse_local_timestamp never panics; unknown shapes yield None
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::CommandFactory;

/// Timestamp written into date columns: `YYYY-MM-DD HH:MM:SS` in the report timezone.
pub fn sheet_datetime(dt: &DateTime<Utc>, tz: &Tz) -> String {
  dt.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Human-facing timestamp used inside detail strings: `dd/mm/yyyy hh:mm`.
pub fn display_datetime(dt: &DateTime<Utc>, tz: &Tz) -> String {
  dt.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string()
}

const NAIVE_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Read a timestamp as wall-clock time in `tz`.
///
/// RFC3339 inputs are converted into `tz`; naive inputs (with or without seconds,
/// or a bare date at midnight) are taken as already local.
pub fn parse_local_timestamp(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
  let s = raw.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(tz).naive_local());
  }

  NAIVE_FORMATS
    .iter()
    .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    .or_else(|| {
      NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

/// Returns the effective "now" given an optional override.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

/// "M minutes and S seconds" for run timing logs.
pub fn describe_elapsed(elapsed: std::time::Duration) -> String {
  let secs = elapsed.as_secs();
  format!("{} minutes and {} seconds", secs / 60, secs % 60)
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use clap::Parser;

  #[test]
  fn formats_in_report_timezone() {
    let dt = Utc.with_ymd_and_hms(2025, 8, 13, 15, 45, 0).unwrap();
    assert_eq!(sheet_datetime(&dt, &Tz::UTC), "2025-08-13 15:45:00");
    assert_eq!(display_datetime(&dt, &Tz::UTC), "13/08/2025 15:45");
    assert_eq!(display_datetime(&dt, &chrono_tz::America::Sao_Paulo), "13/08/2025 12:45");
  }

  #[test]
  fn parses_rfc3339_naive_and_bare_dates() {
    let sp = chrono_tz::America::Sao_Paulo;
    let a = parse_local_timestamp("2025-08-13T15:45:00Z", &sp).unwrap();
    assert_eq!(a.to_string(), "2025-08-13 12:45:00");

    let b = parse_local_timestamp("2025-08-13 10:30", &sp).unwrap();
    assert_eq!(b.to_string(), "2025-08-13 10:30:00");

    let c = parse_local_timestamp("2025-08-13", &Tz::UTC).unwrap();
    assert_eq!(c.to_string(), "2025-08-13 00:00:00");

    assert!(parse_local_timestamp("someday", &Tz::UTC).is_none());
  }

  #[test]
  fn elapsed_phrase_splits_minutes_and_seconds() {
    assert_eq!(describe_elapsed(std::time::Duration::from_millis(125_900)), "2 minutes and 5 seconds");
  }

  #[derive(Parser, Debug)]
  #[command(name = "dummy", version, about = "Dummy CLI", long_about = None)]
  struct DummyCli;

  #[test]
  fn render_man_page_produces_troff_text() {
    let page = render_man_page::<DummyCli>().expect("render manpage");
    assert!(page.contains(".TH"));
    assert!(page.to_lowercase().contains("dummy"));
  }
}
