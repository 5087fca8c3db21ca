//! # Run Command
//!
//! Resolves the settings for a run, rewrites every matching file, and maps
//! the outcome to the process exit status.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{CliOverrides, ConfigError, Settings, load_config};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::processor::{ErrorPolicy, Processor, ProcessorConfig};
use crate::templates::CommentStyle;
use crate::verbose_log;

/// Arguments for a run
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Files or directories to process. Directories are processed recursively,
  /// skipping hidden directories.
  #[arg(value_name = "DIR | FILE")]
  pub targets: Vec<PathBuf>,

  /// Template file for the header text [default: built-in MPL 2.0 notice]
  #[arg(long, short = 't', value_name = "FILE")]
  pub template: Option<PathBuf>,

  /// Comma-separated list of file extensions to process [default: go]
  #[arg(long, short = 'e', value_name = "LIST")]
  pub extensions: Option<String>,

  /// Comment style used to render the header and to find the existing one
  /// [default: single]
  #[arg(long, short = 's', value_enum)]
  pub style: Option<CommentStyle>,

  /// Years substituted for $YEAR$ [default: the current year]
  #[arg(long, short = 'y', visible_alias = "year")]
  pub years: Option<String>,

  /// Authors substituted for $AUTHORS$ [default: the current user]
  #[arg(long, short = 'a')]
  pub authors: Option<String>,

  /// Do not print a line for each updated file
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// What to do when a file cannot be processed [default: abort]
  #[arg(long, value_enum, value_name = "POLICY")]
  pub on_error: Option<ErrorPolicy>,

  /// Control when to use colored output (auto, never, always)
  #[arg(long, value_name = "WHEN", default_value_t = ColorMode::Auto, value_enum)]
  pub colors: ColorMode,

  /// Path to config file (default: .copyright.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Write a JSON report of every processed file to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

impl RunArgs {
  fn overrides(&self) -> CliOverrides {
    CliOverrides {
      template: self.template.clone(),
      extensions: self.extensions.clone(),
      style: self.style,
      years: self.years.clone(),
      authors: self.authors.clone(),
      quiet: self.quiet,
      on_error: self.on_error,
      targets: self.targets.clone(),
    }
  }

  /// Loads the config file and merges it with the command line.
  fn resolve_settings(&self) -> Result<(Settings, String), ConfigError> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = load_config(self.config.as_deref(), &current_dir, self.no_config)?;
    let settings = Settings::resolve(self.overrides(), config)?;
    let header = settings.render_header()?;

    Ok((settings, header))
  }
}

/// Run with the given arguments
///
/// Configuration problems are reported before any file is touched and exit
/// with status 1, as does a run in which any file failed.
pub fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let (settings, header) = match args.resolve_settings() {
    Ok(resolved) => resolved,
    Err(e) => {
      eprintln!("ERROR: {e}");
      process::exit(1);
    }
  };

  if settings.quiet && args.verbose == 0 {
    set_quiet();
  }

  debug!(
    style = %settings.style,
    years = %settings.license_data.years,
    authors = %settings.license_data.authors,
    "Resolved settings"
  );
  debug!("Rendered header:\n{header}");

  let processor = Processor::new(ProcessorConfig::from_settings(&settings, header));

  let start_time = Instant::now();
  let summary = match processor.process(&settings.targets) {
    Ok(summary) => summary,
    Err(e) => {
      eprintln!("ERROR: {e}");
      process::exit(1);
    }
  };

  verbose_log!(
    "Updated {} file(s) in {:.2?}",
    summary.updated_count(),
    start_time.elapsed()
  );

  if let Some(report_path) = &args.report_json {
    summary
      .write_json(report_path)
      .with_context(|| format!("Failed to generate JSON report at {}", report_path.display()))?;
    verbose_log!("Report written to {}", report_path.display());
  }

  if summary.has_failures() {
    eprintln!("ERROR: {} file(s) could not be updated", summary.failures().count());
    process::exit(1);
  }

  Ok(())
}
