//! # Processor Module
//!
//! This module rewrites files so that they start with the rendered header.
//!
//! The module is organized into several submodules:
//! - [`header_scanner`] - splitting a file at the end of its leading comment
//!   block
//! - [`file_io`] - reading and rewriting a single file
//! - [`file_collector`] - walking the targets
//!
//! The [`Processor`] struct is the main entry point, tying the submodules to
//! the extension filter, the copyright detector and the error policy.

mod error;
mod file_collector;
mod file_io;
mod header_scanner;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
pub use error::{IoAction, ProcessError};
pub use file_collector::FileCollector;
pub use file_io::FileIO;
pub use header_scanner::{BlockDisposition, ContentSplit, LineDestination, ScanState};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::config::Settings;
use crate::file_filter::FileFilter;
use crate::info_log;
use crate::license_detection::{CopyrightSubstringDetector, LicenseDetector};
use crate::report::{FileAction, FileReport, ProcessingSummary};
use crate::templates::CommentStyle;

/// What to do when one file cannot be processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
  /// Stop at the first error
  #[default]
  Abort,
  /// Report the error, keep going, and fail at the end
  Continue,
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// The rendered header written at the top of every file
  pub header: String,
  pub style: CommentStyle,
  pub file_filter: Box<dyn FileFilter>,
  pub quiet: bool,
  pub error_policy: ErrorPolicy,
  /// Defaults to [`CopyrightSubstringDetector`]
  pub license_detector: Option<Box<dyn LicenseDetector>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     quiet: true,
  ///     ..ProcessorConfig::new(header, style, Box::new(extensions))
  /// }
  /// ```
  pub fn new(header: String, style: CommentStyle, file_filter: Box<dyn FileFilter>) -> Self {
    Self {
      header,
      style,
      file_filter,
      quiet: false,
      error_policy: ErrorPolicy::default(),
      license_detector: None,
    }
  }

  /// Builds the config for a run from resolved settings and the header
  /// rendered from them.
  pub fn from_settings(settings: &Settings, header: String) -> Self {
    Self {
      quiet: settings.quiet,
      error_policy: settings.error_policy,
      ..Self::new(header, settings.style, Box::new(settings.extensions.clone()))
    }
  }
}

/// Rewrites files so they start with a given header.
///
/// Files are handled one at a time: each is read, classified and rewritten
/// before the next one is opened.
pub struct Processor {
  header: String,
  style: CommentStyle,
  file_filter: Box<dyn FileFilter>,
  quiet: bool,
  error_policy: ErrorPolicy,
  license_detector: Box<dyn LicenseDetector>,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      header: config.header,
      style: config.style,
      file_filter: config.file_filter,
      quiet: config.quiet,
      error_policy: config.error_policy,
      license_detector: config
        .license_detector
        .unwrap_or_else(|| Box::new(CopyrightSubstringDetector::new())),
    }
  }

  /// Processes every matching file under each target, in order.
  ///
  /// # Errors
  ///
  /// With [`ErrorPolicy::Abort`] the first failure is returned and the
  /// remaining files are left alone. With [`ErrorPolicy::Continue`] failures
  /// are recorded in the returned summary instead.
  pub fn process(&self, targets: &[PathBuf]) -> Result<ProcessingSummary, ProcessError> {
    let mut summary = ProcessingSummary::default();

    for target in targets {
      for entry in FileCollector::walk(target) {
        let path = match entry {
          Ok(path) => path,
          Err(err) => {
            self.handle_error(err, &mut summary)?;
            continue;
          }
        };

        let filter_result = self.file_filter.should_process(&path);
        if !filter_result.should_process {
          trace!(
            "Skipping: {} ({})",
            path.display(),
            filter_result.reason.as_deref().unwrap_or("filtered")
          );
          continue;
        }

        match self.process_file(&path) {
          Ok(action) => summary.record(FileReport::updated(path, action)),
          Err(err) => self.handle_error(err, &mut summary)?,
        }
      }
    }

    debug!(
      "Updated {} files, {} failed",
      summary.updated_count(),
      summary.failures().count()
    );

    Ok(summary)
  }

  /// Replaces the leading comment block of one file with the header.
  ///
  /// The file is not checked against the filter.
  pub fn process_file(&self, path: &Path) -> Result<FileAction, ProcessError> {
    let split = FileIO::read_split(path, self.style)?;
    let (body, disposition) = split.into_body(&*self.license_detector);

    FileIO::write_with_header(path, self.header.as_bytes(), &body)?;

    debug!("Rewrote {} ({:?} leading block)", path.display(), disposition);
    if !self.quiet {
      info_log!("Updated {}", path.display());
    }

    Ok(FileAction::from(disposition))
  }

  fn handle_error(&self, err: ProcessError, summary: &mut ProcessingSummary) -> Result<(), ProcessError> {
    match self.error_policy {
      ErrorPolicy::Abort => Err(err),
      ErrorPolicy::Continue => {
        eprintln!("Error: {err}");
        summary.record(FileReport::failed(err.path().to_path_buf(), &err));
        Ok(())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use crate::file_filter::ExtensionFilter;

  fn processor(style: CommentStyle, header: &str) -> Processor {
    let filter = ExtensionFilter::parse("go").unwrap();
    Processor::new(ProcessorConfig {
      quiet: true,
      ..ProcessorConfig::new(header.to_string(), style, Box::new(filter))
    })
  }

  #[test]
  fn test_process_file_reports_action() {
    let temp_dir = tempfile::Builder::new().prefix("processor").tempdir().unwrap();
    let stale = temp_dir.path().join("stale.go");
    let fresh = temp_dir.path().join("fresh.go");
    fs::write(&stale, "// Copyright 2019 X\n\npackage a\n").unwrap();
    fs::write(&fresh, "package b\n").unwrap();

    let processor = processor(CommentStyle::Single, "// Copyright 2025 X\n");

    assert_eq!(processor.process_file(&stale).unwrap(), FileAction::Replaced);
    assert_eq!(processor.process_file(&fresh).unwrap(), FileAction::Inserted);
    assert_eq!(fs::read_to_string(&stale).unwrap(), "// Copyright 2025 X\n\npackage a\n");
    assert_eq!(fs::read_to_string(&fresh).unwrap(), "// Copyright 2025 X\n\npackage b\n");
  }

  #[test]
  fn test_custom_detector() {
    struct NeverLicensed;
    impl LicenseDetector for NeverLicensed {
      fn has_license(&self, _block: &[u8]) -> bool {
        false
      }
    }

    let temp_dir = tempfile::Builder::new().prefix("processor").tempdir().unwrap();
    let path = temp_dir.path().join("a.go");
    fs::write(&path, "// Copyright 2019 X\npackage a\n").unwrap();

    let processor = Processor::new(ProcessorConfig {
      quiet: true,
      license_detector: Some(Box::new(NeverLicensed)),
      ..ProcessorConfig::new(
        "// H\n".to_string(),
        CommentStyle::Single,
        Box::new(ExtensionFilter::parse("go").unwrap()),
      )
    });

    assert_eq!(processor.process_file(&path).unwrap(), FileAction::Inserted);
    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      "// H\n\n// Copyright 2019 X\npackage a\n"
    );
  }

  #[test]
  fn test_error_policy_parses_from_cli_values() {
    assert_eq!(ErrorPolicy::from_str("abort", false), Ok(ErrorPolicy::Abort));
    assert_eq!(ErrorPolicy::from_str("continue", false), Ok(ErrorPolicy::Continue));
  }
}
