//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod run;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::{RunArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "copyright",
  version,
  long_version = LONG_VERSION,
  about = "Inserts and adjusts copyright notices in source files.",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add or refresh the default header in every .go file under the current directory
  copyright .

  # Use a custom template with /* ... */ comments for C sources
  copyright --template HEADER.txt --style multi --extensions c,h src/ include/

  # Shell and Python scripts, keeping going past unwritable files
  copyright --style hash --extensions sh,py --on-error continue scripts/

Template placeholders:
  $YEAR$     replaced with --years (default: the current year)
  $AUTHORS$  replaced with --authors (default: the current user)
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub run_args: RunArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use clap::CommandFactory;

  use super::*;
  use crate::processor::ErrorPolicy;
  use crate::templates::CommentStyle;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_all_flags() {
    let cli = Cli::try_parse_from([
      "copyright",
      "-t",
      "HEADER.txt",
      "-e",
      "go,rs",
      "-s",
      "multi",
      "-y",
      "2016-2025",
      "-a",
      "Jane Doe",
      "-q",
      "--on-error",
      "continue",
      "src",
      "main.go",
    ])
    .unwrap();

    let args = cli.run_args;
    assert_eq!(args.template, Some(PathBuf::from("HEADER.txt")));
    assert_eq!(args.extensions.as_deref(), Some("go,rs"));
    assert_eq!(args.style, Some(CommentStyle::Multi));
    assert_eq!(args.years.as_deref(), Some("2016-2025"));
    assert_eq!(args.authors.as_deref(), Some("Jane Doe"));
    assert!(args.quiet);
    assert_eq!(args.on_error, Some(ErrorPolicy::Continue));
    assert_eq!(args.targets, vec![PathBuf::from("src"), PathBuf::from("main.go")]);
  }

  #[test]
  fn test_year_alias() {
    let cli = Cli::try_parse_from(["copyright", "--year", "2020", "."]).unwrap();
    assert_eq!(cli.run_args.years.as_deref(), Some("2020"));
  }

  #[test]
  fn test_invalid_style_is_rejected() {
    assert!(Cli::try_parse_from(["copyright", "--style", "block", "."]).is_err());
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["copyright", "-q", "-v", "."]).is_err());
  }
}
