// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Changelog look-back window ([now - datespan days, now]) and the `--now-override` parser
// role: window/time-bounds
// inputs: now instant, datespan in days, optional override string, report timezone
// outputs: ChangeWindow with inclusive bounds
// invariants: start <= end; both bounds inclusive; negative or out-of-range datespans are rejected
// errors: Unparseable overrides and negative datespans bail with the offending value
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Result, bail};
use chrono::{DateTime, Duration, LocalResult, Utc};
use chrono_tz::Tz;

use crate::util::parse_local_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeWindow {
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
}

impl ChangeWindow {
  pub fn looking_back(now: DateTime<Utc>, datespan_days: i64) -> Result<Self> {
    if datespan_days < 0 {
      bail!("datespan must be zero or more days, got {}", datespan_days);
    }

    let Some(start) = Duration::try_days(datespan_days).and_then(|span| now.checked_sub_signed(span)) else {
      bail!("datespan of {} days reaches before the earliest representable date", datespan_days);
    };

    Ok(Self { start, end: now })
  }

  pub fn contains(&self, at: &DateTime<Utc>) -> bool {
    *at >= self.start && *at <= self.end
  }
}

/// Parse a `--now-override` string.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive timestamp read in `tz`.
pub fn parse_now_override(raw: Option<&str>, tz: &Tz) -> Result<Option<DateTime<Utc>>> {
  let Some(s) = raw else { return Ok(None) };

  if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
    return Ok(Some(dt.with_timezone(&Utc)));
  }

  let Some(naive) = parse_local_timestamp(s, tz) else {
    bail!("cannot parse --now-override {:?}", s);
  };

  match naive.and_local_timezone(*tz) {
    LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(Some(dt.with_timezone(&Utc))),
    LocalResult::None => bail!("--now-override {:?} does not exist in {}", s, tz),
  }
}
