//! # copyright
//!
//! Inserts and adjusts copyright notices at the top of source files.

mod cli;
mod config;
mod file_filter;
mod license_detection;
mod logging;
mod processor;
mod report;
mod templates;

use anyhow::Result;

use crate::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.run_args)
}
