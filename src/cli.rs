// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Command-line surface and its normalization into one EffectiveConfig
// role: cli/normalize
// inputs: argv via clap; the JSON config file and env credentials via config::FileConfig
// outputs: Cli (raw flags) and EffectiveConfig (validated, typed settings passed to every component)
// invariants:
// - Ranges, timezone and --now-override are parsed once here; later stages never re-parse strings
// - --workbook on the command line beats the config file's workbook
// - Sort columns and page size are validated before any I/O happens
// errors: anyhow with the offending value; bad ranges surface as ReportError::InvalidRange
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};

use crate::config::FileConfig;
use crate::sheets::range::A1Range;
use crate::window::parse_now_override;

#[derive(Parser, Debug)]
#[command(
    name = "testlodge-report",
    version,
    about = "Export TestLodge project summaries and changelogs into a spreadsheet workbook",
    long_about = None
)]
pub struct Cli {
  /// JSON configuration file (ranges, sheet names, holidays, timezone, credentials)
  #[arg(long, global = true)]
  pub config: Option<PathBuf>,

  /// Workbook JSON file read for lookups and rewritten with the report
  #[arg(long, global = true)]
  pub workbook: Option<PathBuf>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used for the changelog window (hidden; tests only)
  #[arg(long = "now-override", hide = true, global = true)]
  pub now_override: Option<String>,

  #[command(subcommand)]
  pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
  /// Rewrite the changelog sheet with step and run events from the look-back window
  Changelog {
    /// Look-back window in days (default: the workbook's datespan cell)
    #[arg(long)]
    datespan: Option<i64>,
  },
  /// Rewrite the project summary sheet with per-project test case totals
  Summary,
  /// Print business hours between two timestamps
  Duration {
    #[arg(long)]
    start: String,
    #[arg(long)]
    end: String,
  },
  /// Print business hours for each start/end pair in a JSON marker file
  Durations {
    #[arg(long)]
    markers: PathBuf,
  },
  /// Append a diagnostic row to the log sheet
  Log {
    #[arg(long)]
    function: String,
    #[arg(long)]
    message: String,
    /// JSON value stored alongside the message
    #[arg(long)]
    context: Option<String>,
  },
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
  pub base_url: String,
  pub email: Option<String>,
  pub token: Option<String>,
  pub page_size: u32,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
  pub api: ApiSettings,
  pub workbook: Option<PathBuf>,
  pub datespan_cell: A1Range,
  pub squads_range: A1Range,
  pub overrides_range: A1Range,
  pub summary_sheet: String,
  pub changelog_sheet: String,
  pub log_sheet: String,
  pub changelog_sort_column: usize,
  pub summary_sort_column: usize,
  pub holidays: BTreeSet<NaiveDate>,
  pub tz: Tz,
  pub now_override: Option<DateTime<Utc>>,
}

impl EffectiveConfig {
  pub fn require_workbook(&self) -> Result<&PathBuf> {
    self
      .workbook
      .as_ref()
      .ok_or_else(|| anyhow!("no workbook given; pass --workbook or set \"workbook\" in the config file"))
  }
}

fn parse_range(raw: &str, key: &str) -> Result<A1Range> {
  raw.parse::<A1Range>().with_context(|| format!("config key {}", key))
}

pub fn normalize(cli: &Cli) -> Result<EffectiveConfig> {
  let file = FileConfig::load(cli.config.as_deref())?.with_env_credentials();

  let tz: Tz = file
    .timezone
    .parse()
    .map_err(|_| anyhow!("unknown timezone {:?}; expected an IANA name like America/Sao_Paulo", file.timezone))?;

  if file.page_size == 0 {
    bail!("page_size must be at least 1");
  }
  for (key, col) in [
    ("changelog_sort_column", file.changelog_sort_column),
    ("summary_sort_column", file.summary_sort_column),
  ] {
    if col == 0 {
      bail!("{} is 1-based; got 0", key);
    }
  }

  let now_override = parse_now_override(cli.now_override.as_deref(), &tz)?;

  Ok(EffectiveConfig {
    api: ApiSettings {
      base_url: file.api_url.trim_end_matches('/').to_string(),
      email: file.api_email.clone(),
      token: file.api_token.clone(),
      page_size: file.page_size,
    },
    workbook: cli.workbook.clone().or_else(|| file.workbook.clone()),
    datespan_cell: parse_range(&file.datespan_range, "datespan_range")?,
    squads_range: parse_range(&file.project_squads_range, "project_squads_range")?,
    overrides_range: parse_range(&file.user_overrides_range, "user_overrides_range")?,
    summary_sheet: file.summary_sheet,
    changelog_sheet: file.changelog_sheet,
    log_sheet: file.log_sheet,
    changelog_sort_column: file.changelog_sort_column,
    summary_sort_column: file.summary_sort_column,
    holidays: file.holidays.into_iter().collect(),
    tz,
    now_override,
  })
}
