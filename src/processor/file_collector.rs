//! # File Collector Module
//!
//! This module walks the targets given on the command line and yields the
//! regular files found under them.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use super::error::ProcessError;

/// File collector for directory traversal.
///
/// Directories whose name starts with `.` are skipped along with everything
/// below them. `.` and `..` are not considered hidden. Symlinks are never
/// followed below the target itself.
pub struct FileCollector;

impl FileCollector {
  /// Lazily walks `target`, yielding regular files in file-name order.
  ///
  /// A target that is itself a regular file yields just that file. Errors
  /// (a missing target, an unreadable directory) are yielded in place so the
  /// caller can decide whether to stop.
  pub fn walk(target: &Path) -> impl Iterator<Item = Result<PathBuf, ProcessError>> + use<> {
    debug!("Scanning: {}", target.display());

    let root = target.to_path_buf();
    WalkDir::new(target)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| !is_hidden_dir(entry))
      .filter_map(move |entry| match entry {
        Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
        Ok(entry) => {
          if !entry.file_type().is_dir() {
            trace!("Skipping: {} (not a regular file)", entry.path().display());
          }
          None
        }
        Err(source) => {
          let path = source.path().map_or_else(|| root.clone(), Path::to_path_buf);
          Some(Err(ProcessError::Walk { path, source }))
        }
      })
  }
}

/// Whether `entry` is a directory whose base name starts with a dot.
///
/// The last path component is used rather than the entry's file name so that
/// roots such as `./` or `..` are treated like `.` and `..`.
fn is_hidden_dir(entry: &DirEntry) -> bool {
  if !entry.file_type().is_dir() {
    return false;
  }
  let hidden = matches!(
    entry.path().components().next_back(),
    Some(Component::Normal(name)) if name.to_string_lossy().starts_with('.')
  );
  if hidden {
    trace!("Skipping: {} (hidden directory)", entry.path().display());
  }
  hidden
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  // The default `.tmp` prefix would make every test root a hidden directory.
  fn workspace() -> TempDir {
    tempfile::Builder::new().prefix("collector").tempdir().unwrap()
  }

  fn collect(target: &Path) -> Vec<PathBuf> {
    FileCollector::walk(target).map(|result| result.unwrap()).collect()
  }

  fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
    files
      .into_iter()
      .map(|path| path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
      .collect()
  }

  #[test]
  fn test_walk_skips_hidden_directories() {
    let temp_dir = workspace();
    let root = temp_dir.path();
    fs::create_dir_all(root.join(".git/objects")).unwrap();
    fs::create_dir_all(root.join("pkg/.cache")).unwrap();
    fs::write(root.join(".git/config.go"), "").unwrap();
    fs::write(root.join(".git/objects/a.go"), "").unwrap();
    fs::write(root.join("pkg/.cache/b.go"), "").unwrap();
    fs::write(root.join("pkg/c.go"), "").unwrap();
    fs::write(root.join(".hidden.go"), "").unwrap();
    fs::write(root.join("main.go"), "").unwrap();

    let files = relative(root, collect(root));
    // Hidden files are fine; only hidden directories are skipped.
    assert_eq!(files, vec![".hidden.go", "main.go", "pkg/c.go"]);
  }

  #[test]
  fn test_walk_hidden_root_is_skipped() {
    let temp_dir = workspace();
    let hidden = temp_dir.path().join(".config");
    fs::create_dir_all(&hidden).unwrap();
    fs::write(hidden.join("a.go"), "").unwrap();

    assert!(collect(&hidden).is_empty());
  }

  #[test]
  fn test_walk_single_file_target() {
    let temp_dir = workspace();
    let file = temp_dir.path().join("main.go");
    fs::write(&file, "").unwrap();

    assert_eq!(collect(&file), vec![file]);
  }

  #[test]
  fn test_walk_missing_target_yields_error() {
    let temp_dir = workspace();
    let missing = temp_dir.path().join("missing");

    let results: Vec<_> = FileCollector::walk(&missing).collect();
    assert_eq!(results.len(), 1);
    let err = results.into_iter().next().unwrap().unwrap_err();
    assert!(matches!(err, ProcessError::Walk { .. }));
    assert_eq!(err.path(), missing.as_path());
  }

  #[test]
  fn test_hidden_dir_detection_ignores_dot_roots() {
    let temp_dir = workspace();
    let dot = temp_dir.path().join(".");
    fs::write(temp_dir.path().join("a.go"), "").unwrap();

    assert_eq!(collect(&dot).len(), 1);
  }
}
