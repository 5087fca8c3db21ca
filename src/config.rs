//! # Configuration Module
//!
//! This module resolves everything a run needs into one immutable
//! [`Settings`] value. Values come from three layers, highest priority first:
//!
//! 1. Command-line flags ([`CliOverrides`])
//! 2. An optional `.copyright.toml` file ([`Config`])
//! 3. Built-in defaults (single-line comments, `.go` files, the current year,
//!    the current user)
//!
//! The config file is only ever read. Its location is taken from `--config`,
//! then the `COPYRIGHT_CONFIG` environment variable, then the current
//! directory.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::Deserialize;

use crate::file_filter::ExtensionFilter;
use crate::processor::ErrorPolicy;
use crate::templates::{CommentStyle, LicenseData, TemplateManager};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".copyright.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "COPYRIGHT_CONFIG";

/// Extensions processed when neither the CLI nor the config file name any.
pub const DEFAULT_EXTENSIONS: &str = "go";

/// Fallback copyright holder when the user name cannot be determined.
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Error type for configuration operations.
///
/// Every variant is fatal: it is reported before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{}': {source}", .path.display())]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML or unknown keys.
  #[error("Failed to parse config file '{}': {source}", .path.display())]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// No file or directory to process was given.
  #[error("At least one directory or file must be specified.")]
  NoTargets,

  /// The extension list was empty after normalization.
  #[error("The extensions option must specify at least one extension.")]
  NoExtensions,

  /// The template path is a directory.
  #[error("The template must be a file: {}", .path.display())]
  TemplateIsDirectory { path: PathBuf },

  /// The template file could not be opened or read.
  #[error("Unable to read template file '{}': {source}", .path.display())]
  TemplateRead { path: PathBuf, source: std::io::Error },
}

/// Contents of a `.copyright.toml` file.
///
/// Every key is optional; missing keys fall through to the defaults.
///
/// ```toml
/// template = "HEADER.txt"
/// extensions = ["go", "rs"]
/// style = "multi"
/// years = "2016-2025"
/// authors = "Jane Doe"
/// quiet = false
/// on-error = "continue"
/// ```
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
  /// Template file. Relative paths are resolved against the config file's
  /// directory.
  pub template: Option<PathBuf>,

  /// Extensions to process, with or without the leading dot.
  pub extensions: Option<Vec<String>>,

  pub style: Option<CommentStyle>,

  pub years: Option<String>,

  pub authors: Option<String>,

  pub quiet: Option<bool>,

  /// What to do when a single file cannot be rewritten.
  pub on_error: Option<ErrorPolicy>,
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    if let (Some(template), Some(base)) = (config.template.as_ref(), path.parent())
      && template.is_relative()
    {
      config.template = Some(base.join(template));
    }

    Ok(config)
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `COPYRIGHT_CONFIG` environment variable
/// 3. `.copyright.toml` in `base_dir`
///
/// An explicit path is returned even if it does not exist, so that loading
/// it reports the problem instead of silently falling back.
pub fn discover_config_path(explicit_path: Option<&Path>, base_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
    && !env_path.is_empty()
  {
    verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, env_path);
    return Some(PathBuf::from(env_path));
  }

  let local_config = base_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.is_file() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, if any.
///
/// Returns `Ok(None)` when `no_config` is set or nothing was discovered.
pub fn load_config(explicit_path: Option<&Path>, base_dir: &Path, no_config: bool) -> Result<Option<Config>, ConfigError> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  discover_config_path(explicit_path, base_dir)
    .map(|path| Config::load(&path))
    .transpose()
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub template: Option<PathBuf>,
  pub extensions: Option<String>,
  pub style: Option<CommentStyle>,
  pub years: Option<String>,
  pub authors: Option<String>,
  pub quiet: bool,
  pub on_error: Option<ErrorPolicy>,
  pub targets: Vec<PathBuf>,
}

/// Fully resolved, immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Settings {
  /// Template file, or `None` for the built-in template
  pub template: Option<PathBuf>,
  pub extensions: ExtensionFilter,
  pub style: CommentStyle,
  pub license_data: LicenseData,
  pub quiet: bool,
  pub error_policy: ErrorPolicy,
  pub targets: Vec<PathBuf>,
}

impl Settings {
  /// Merges CLI values over config file values over defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if no targets were given or the extension set ends up
  /// empty.
  pub fn resolve(cli: CliOverrides, file: Option<Config>) -> Result<Self, ConfigError> {
    if cli.targets.is_empty() {
      return Err(ConfigError::NoTargets);
    }

    let file = file.unwrap_or_default();

    let extensions = match (cli.extensions, file.extensions) {
      (Some(list), _) => ExtensionFilter::parse(&list)?,
      (None, Some(entries)) => ExtensionFilter::new(entries)?,
      (None, None) => ExtensionFilter::parse(DEFAULT_EXTENSIONS)?,
    };

    let license_data = LicenseData {
      years: cli.years.or(file.years).unwrap_or_else(current_year),
      authors: cli.authors.or(file.authors).unwrap_or_else(current_user),
    };

    Ok(Self {
      template: cli.template.or(file.template),
      extensions,
      style: cli.style.or(file.style).unwrap_or_default(),
      license_data,
      quiet: cli.quiet || file.quiet.unwrap_or(false),
      error_policy: cli.on_error.or(file.on_error).unwrap_or_default(),
      targets: cli.targets,
    })
  }

  /// Loads the selected template and renders the header for this run.
  pub fn render_header(&self) -> Result<String, ConfigError> {
    let mut manager = TemplateManager::new();
    if let Some(path) = &self.template {
      manager.load_template(path)?;
    }
    Ok(manager.render_header(&self.license_data, self.style))
  }
}

/// The current calendar year as a four-digit string.
pub fn current_year() -> String {
  chrono::Local::now().year().to_string()
}

/// The display name of the user running the tool.
///
/// Tries the account's real name, then its login name, then `USER` and
/// `USERNAME`. Blank values are skipped.
pub fn current_user() -> String {
  let lookups: [fn() -> Option<String>; 3] = [
    || whoami::fallible::realname().ok(),
    || whoami::fallible::username().ok(),
    || ["USER", "USERNAME"].into_iter().find_map(|var| std::env::var(var).ok()),
  ];

  lookups
    .into_iter()
    .filter_map(|lookup| lookup())
    .map(|name| name.trim().to_string())
    .find(|name| !name.is_empty())
    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}
