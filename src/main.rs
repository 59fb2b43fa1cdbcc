use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod cli;
mod commands;
mod config;
mod duration;
mod error;
mod ext;
mod lookup;
mod model;
mod report;
mod sheets;
mod testlodge;
mod util;
mod window;

use crate::cli::{Cli, normalize};

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing();

  // Phase 1: normalize CLI + config file
  let cfg = normalize(&cli)?;

  // Phase 2: run the selected entry point
  let Some(command) = cli.command.as_ref() else {
    bail!("Provide a subcommand: changelog, summary, duration, durations or log (see --help)");
  };

  commands::dispatch(&cfg, command)
}
