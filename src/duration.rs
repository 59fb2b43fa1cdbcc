// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Business-hour durations (Mon–Fri, 09:00–18:00, minus holidays) for single spans and start/end marker batches
// role: metrics/duration
// inputs: Local wall-clock timestamps (or strings parsed in the report timezone); holiday dates
// outputs: Hours as f64, floored at 1 and rounded to 2 decimals
// invariants:
// - Only clock hours count: the first day uses the start hour, the last day the end hour, both clamped to [9, 18]
// - Weekends and holidays contribute nothing; results are never below 1
// - Batch pairs each start with the next end in chronological order; orphan ends are skipped
// errors: ReportError::InvalidDateInput naming both raw values
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::util::parse_local_timestamp;

pub const WORKDAY_START_HOUR: u32 = 9;
pub const WORKDAY_END_HOUR: u32 = 18;
pub const MIN_DURATION_HOURS: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct WorkCalendar {
  holidays: BTreeSet<NaiveDate>,
  tz: Tz,
}

impl WorkCalendar {
  pub fn new<I>(holidays: I, tz: Tz) -> Self
  where
    I: IntoIterator<Item = NaiveDate>,
  {
    Self {
      holidays: holidays.into_iter().collect(),
      tz,
    }
  }

  pub fn is_business_day(&self, day: NaiveDate) -> bool {
    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&day)
  }

  pub fn duration(&self, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let (first, last) = (start.date(), end.date());
    let mut total: u32 = 0;
    let mut day = first;

    while day <= last {
      if self.is_business_day(day) {
        let from = if day == first { start.hour() } else { WORKDAY_START_HOUR };
        let to = if day == last { end.hour() } else { WORKDAY_END_HOUR };

        let from = from.max(WORKDAY_START_HOUR);
        let to = to.min(WORKDAY_END_HOUR);

        total += to.saturating_sub(from);
      }

      match day.succ_opt() {
        Some(next) => day = next,
        None => break,
      }
    }

    let hours = f64::from(total).max(MIN_DURATION_HOURS);
    (hours * 100.0).round() / 100.0
  }

  fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
    parse_local_timestamp(raw, &self.tz)
  }

  pub fn duration_between(&self, start: &str, end: &str) -> Result<f64> {
    match (self.parse(start), self.parse(end)) {
      (Some(s), Some(e)) => Ok(self.duration(s, e)),
      _ => Err(
        ReportError::InvalidDateInput {
          start: start.to_string(),
          end: end.to_string(),
        }
        .into(),
      ),
    }
  }

  /// One duration per start→end pair, in chronological order.
  pub fn batch(&self, markers: &[Marker]) -> Result<Vec<f64>> {
    let mut parsed: Vec<(NaiveDateTime, MarkerKind)> = Vec::with_capacity(markers.len());

    for m in markers {
      let at = self.parse(&m.date).ok_or_else(|| ReportError::InvalidDateInput {
        start: m.date.clone(),
        end: m.date.clone(),
      })?;
      parsed.push((at, m.kind));
    }
    parsed.sort_by_key(|(at, _)| *at);

    let mut pending: Option<NaiveDateTime> = None;
    let mut out = Vec::new();

    for (at, kind) in parsed {
      match kind {
        MarkerKind::Start => pending = Some(at),
        MarkerKind::End => {
          if let Some(start) = pending.take() {
            out.push(self.duration(start, at));
          }
        }
      }
    }

    Ok(out)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
  Start,
  End,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
  #[serde(rename = "type")]
  pub kind: MarkerKind,
  pub date: String,
}
