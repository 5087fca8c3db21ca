//! # File I/O Module
//!
//! Reading and rewriting a single file. Each function owns the handle it
//! opens, so the handle is closed on every return path, including `?`
//! early returns.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use super::error::{IoAction, ProcessError};
use super::header_scanner::{ContentSplit, write_with_header};
use crate::templates::CommentStyle;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads a file and splits off its leading comment block.
  ///
  /// The read handle is dropped before this returns.
  pub fn read_split(path: &Path, style: CommentStyle) -> Result<ContentSplit, ProcessError> {
    let file = File::open(path).map_err(ProcessError::io(IoAction::Open, path))?;
    ContentSplit::scan(BufReader::new(file), style).map_err(ProcessError::io(IoAction::Read, path))
  }

  /// Truncates the file and writes `header` followed by `body`.
  ///
  /// The write is not atomic: if it fails part way, the original content is
  /// already gone. The buffer is flushed explicitly so late write errors are
  /// reported rather than lost on drop.
  pub fn write_with_header(path: &Path, header: &[u8], body: &[u8]) -> Result<(), ProcessError> {
    let file = File::create(path).map_err(ProcessError::io(IoAction::Create, path))?;
    let mut writer = BufWriter::new(file);

    write_with_header(&mut writer, header, body)
      .and_then(|()| writer.flush())
      .map_err(ProcessError::io(IoAction::Write, path))
  }
}
