//! # Report Module
//!
//! Per-file outcomes of a run, the end-of-run summary, and the optional JSON
//! report written with `--report-json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::processor::BlockDisposition;

/// Outcome for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// What happened to the file
  pub action: FileAction,
  /// The error message, for failed files
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  pub const fn updated(path: PathBuf, action: FileAction) -> Self {
    Self {
      path,
      action,
      error: None,
    }
  }

  pub fn failed(path: PathBuf, error: &impl std::fmt::Display) -> Self {
    Self {
      path,
      action: FileAction::Failed,
      error: Some(error.to_string()),
    }
  }
}

/// Possible outcomes for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
  /// An existing copyright block was replaced by the new header
  Replaced,
  /// The header was added; any leading comment was kept below it
  Inserted,
  /// The file could not be rewritten
  Failed,
}

impl From<BlockDisposition> for FileAction {
  fn from(disposition: BlockDisposition) -> Self {
    match disposition {
      BlockDisposition::Replaced => FileAction::Replaced,
      BlockDisposition::Kept => FileAction::Inserted,
    }
  }
}

/// All file outcomes of a run, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingSummary {
  pub files: Vec<FileReport>,
}

impl ProcessingSummary {
  pub fn record(&mut self, report: FileReport) {
    self.files.push(report);
  }

  /// Number of files that were rewritten.
  pub fn updated_count(&self) -> usize {
    self.files.iter().filter(|report| report.action != FileAction::Failed).count()
  }

  /// Files that could not be rewritten.
  pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
    self.files.iter().filter(|report| report.action == FileAction::Failed)
  }

  pub fn has_failures(&self) -> bool {
    self.failures().next().is_some()
  }

  /// Writes the summary as pretty-printed JSON.
  pub fn write_json(&self, output_path: &Path) -> Result<()> {
    #[derive(Serialize)]
    struct JsonReport<'a> {
      generated_at: String,
      updated: usize,
      failed: usize,
      files: &'a [FileReport],
    }

    let report = JsonReport {
      generated_at: Local::now().to_rfc3339(),
      updated: self.updated_count(),
      failed: self.failures().count(),
      files: &self.files,
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    fs::write(output_path, json)
      .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    Ok(())
  }
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}
