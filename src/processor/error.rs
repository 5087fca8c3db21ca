use std::fmt;
use std::io;
use std::path::PathBuf;

/// The file operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
  Open,
  Read,
  Create,
  Write,
}

impl fmt::Display for IoAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      IoAction::Open => "open",
      IoAction::Read => "read",
      IoAction::Create => "create",
      IoAction::Write => "write",
    })
  }
}

/// A failure tied to one path.
///
/// Whether it ends the run depends on the processor's
/// [`ErrorPolicy`](super::ErrorPolicy).
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
  /// Opening, reading, creating or writing a file failed.
  #[error("Unable to {action} {}: {source}", .path.display())]
  Io {
    action: IoAction,
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A target or one of its subdirectories could not be walked.
  #[error("Unable to walk {}: {source}", .path.display())]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

impl ProcessError {
  pub(super) fn io(action: IoAction, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| ProcessError::Io { action, path, source }
  }

  /// The path the error refers to.
  pub fn path(&self) -> &std::path::Path {
    match self {
      ProcessError::Io { path, .. } | ProcessError::Walk { path, .. } => path,
    }
  }
}
