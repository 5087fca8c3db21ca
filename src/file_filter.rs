//! # File Filter Module
//!
//! This module contains components for filtering files. The only filter the
//! tool needs is the extension set, but it sits behind the [`FileFilter`]
//! trait so the processor does not care how the decision is made.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::ConfigError;

/// Result of a file filtering operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// The set of file extensions to process.
///
/// Extensions are stored with a leading dot (`.go`) and compared exactly, so
/// `main.GO` does not match `go`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
  extensions: BTreeSet<String>,
}

impl ExtensionFilter {
  /// Builds the set from individual entries, with or without a leading dot.
  ///
  /// Blank entries are dropped.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::NoExtensions`] if no entry survives.
  pub fn new<I, S>(entries: I) -> Result<Self, ConfigError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let extensions: BTreeSet<String> = entries
      .into_iter()
      .filter_map(|entry| normalize_extension(entry.as_ref()))
      .collect();

    if extensions.is_empty() {
      return Err(ConfigError::NoExtensions);
    }

    Ok(Self { extensions })
  }

  /// Builds the set from a comma-separated list such as `go,.rs,c`.
  pub fn parse(list: &str) -> Result<Self, ConfigError> {
    Self::new(list.split(','))
  }

  /// Checks whether the path's extension is in the set.
  pub fn matches(&self, path: &Path) -> bool {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| self.extensions.contains(&format!(".{ext}")))
  }

  /// The normalized extensions, in sorted order.
  pub fn extensions(&self) -> impl Iterator<Item = &str> {
    self.extensions.iter().map(String::as_str)
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    if self.matches(path) {
      FilterResult::process()
    } else {
      FilterResult::skip("Extension not selected")
    }
  }
}

fn normalize_extension(entry: &str) -> Option<String> {
  let entry = entry.trim();
  if entry.is_empty() || entry == "." {
    return None;
  }
  if entry.starts_with('.') {
    Some(entry.to_string())
  } else {
    Some(format!(".{entry}"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_normalizes_leading_dot() {
    let filter = ExtensionFilter::parse("go,.rs, c ,").unwrap();
    let extensions: Vec<&str> = filter.extensions().collect();
    assert_eq!(extensions, vec![".c", ".go", ".rs"]);
  }

  #[test]
  fn test_empty_list_is_rejected() {
    assert!(matches!(ExtensionFilter::parse(""), Err(ConfigError::NoExtensions)));
    assert!(matches!(ExtensionFilter::parse(",, ,"), Err(ConfigError::NoExtensions)));
    assert!(matches!(
      ExtensionFilter::new(Vec::<String>::new()),
      Err(ConfigError::NoExtensions)
    ));
  }

  #[test]
  fn test_extension_filter() {
    let filter = ExtensionFilter::parse("go").unwrap();

    assert!(filter.should_process(Path::new("src/main.go")).should_process);

    let result = filter.should_process(Path::new("src/main.txt"));
    assert!(!result.should_process);
    assert!(result.reason.is_some());
  }

  #[test]
  fn test_extension_match_is_exact() {
    let filter = ExtensionFilter::parse("go").unwrap();

    assert!(!filter.matches(Path::new("main.GO")));
    assert!(!filter.matches(Path::new("main.gox")));
    assert!(!filter.matches(Path::new("Makefile")));
    // A dotfile has no extension as far as Path is concerned.
    assert!(!filter.matches(Path::new(".go")));
    assert!(filter.matches(Path::new("archive.tar.go")));
  }
}
