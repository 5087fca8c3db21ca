//! # Header Scanner Module
//!
//! Splits a file into its leading comment block and everything after it.
//!
//! The split is driven by a small state machine, [`ScanState`], seeded by the
//! [`CommentStyle`] in use. Each line is fed to [`ScanState::advance`], which
//! says where the line goes ([`LineDestination`]) and which state comes next.
//! Once [`ScanState::CopyingRemainder`] is reached every further line is
//! copied verbatim.

use std::io::{self, BufRead, Write};

use crate::license_detection::LicenseDetector;
use crate::templates::CommentStyle;

const LINE_COMMENT: &[u8] = b"//";
const HASH_COMMENT: &[u8] = b"#";
const BLOCK_OPEN: &[u8] = b"/*";
const BLOCK_CLOSE: &[u8] = b"*/";

/// Where a scanned line belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDestination {
  /// Part of the leading comment block
  LeadingBlock,
  /// Part of the remainder
  Remainder,
}

/// State of the leading comment scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
  /// Expecting the `/*` that opens a block comment.
  LookingForBlockStart,
  /// Inside a run of `//` lines.
  LookingForLineCommentContinuation,
  /// Inside a run of `#` lines.
  LookingForHashContinuation,
  /// Inside a block comment, waiting for a line ending in `*/`.
  LookingForBlockEnd,
  /// The leading block is over.
  CopyingRemainder,
}

impl ScanState {
  /// The state a scan starts in for a given comment style.
  pub const fn initial(style: CommentStyle) -> Self {
    match style {
      CommentStyle::Single => ScanState::LookingForLineCommentContinuation,
      CommentStyle::Multi => ScanState::LookingForBlockStart,
      CommentStyle::Hash => ScanState::LookingForHashContinuation,
    }
  }

  /// Classifies one line (without its trailing `\n`) and returns the next
  /// state.
  ///
  /// A block comment that opens and closes on the same line ends the leading
  /// block immediately. The closing `*/` line itself belongs to the block.
  pub fn advance(self, line: &[u8]) -> (Self, LineDestination) {
    use LineDestination::{LeadingBlock, Remainder};

    match self {
      ScanState::LookingForLineCommentContinuation => {
        if line.starts_with(LINE_COMMENT) {
          (self, LeadingBlock)
        } else {
          (ScanState::CopyingRemainder, Remainder)
        }
      }
      ScanState::LookingForHashContinuation => {
        if line.starts_with(HASH_COMMENT) {
          (self, LeadingBlock)
        } else {
          (ScanState::CopyingRemainder, Remainder)
        }
      }
      ScanState::LookingForBlockStart => {
        if !line.starts_with(BLOCK_OPEN) {
          (ScanState::CopyingRemainder, Remainder)
        } else if closes_block(line) {
          (ScanState::CopyingRemainder, LeadingBlock)
        } else {
          (ScanState::LookingForBlockEnd, LeadingBlock)
        }
      }
      ScanState::LookingForBlockEnd => {
        if closes_block(line) {
          (ScanState::CopyingRemainder, LeadingBlock)
        } else {
          (self, LeadingBlock)
        }
      }
      ScanState::CopyingRemainder => (self, Remainder),
    }
  }
}

/// Whether the line, ignoring surrounding whitespace, ends with `*/`.
fn closes_block(line: &[u8]) -> bool {
  line.trim_ascii().ends_with(BLOCK_CLOSE)
}

/// A file partitioned at the end of its leading comment block.
///
/// Every line in both buffers is terminated by `\n`, including a final line
/// that had no newline in the original file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSplit {
  /// The leading comment block, empty if the file did not start with one
  pub leading_block: Vec<u8>,
  /// Everything after the leading comment block
  pub remainder: Vec<u8>,
}

/// What happened to the leading comment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockDisposition {
  /// The block was a copyright notice and has been dropped
  Replaced,
  /// There was no block, or it was kept after the new header
  Kept,
}

impl ContentSplit {
  /// Reads `reader` to the end, splitting off the leading comment block.
  ///
  /// Lines are split on `\n` only and copied as raw bytes, so `\r\n` endings
  /// and non-UTF-8 content survive untouched.
  pub fn scan<R: BufRead>(mut reader: R, style: CommentStyle) -> io::Result<Self> {
    let mut split = ContentSplit::default();
    let mut state = ScanState::initial(style);
    let mut line = Vec::new();

    loop {
      line.clear();
      if reader.read_until(b'\n', &mut line)? == 0 {
        break;
      }
      if line.last() == Some(&b'\n') {
        line.pop();
      }

      let (next, destination) = state.advance(&line);
      state = next;

      let buffer = match destination {
        LineDestination::LeadingBlock => &mut split.leading_block,
        LineDestination::Remainder => &mut split.remainder,
      };
      buffer.extend_from_slice(&line);
      buffer.push(b'\n');
    }

    Ok(split)
  }

  /// Produces the content that follows the new header.
  ///
  /// A leading block that `detector` recognizes as a copyright notice is
  /// dropped. Any other leading block is kept in front of the remainder so
  /// that build constraints and similar comments are never lost.
  pub fn into_body(self, detector: &dyn LicenseDetector) -> (Vec<u8>, BlockDisposition) {
    if !self.leading_block.is_empty() && detector.has_license(&self.leading_block) {
      return (self.remainder, BlockDisposition::Replaced);
    }

    let mut body = self.leading_block;
    body.extend_from_slice(&self.remainder);
    (body, BlockDisposition::Kept)
  }
}

/// Writes the new file content: header, separator, body.
///
/// A single `\n` is inserted between header and body unless the body is
/// empty or already starts with a blank line.
pub fn write_with_header<W: Write>(out: &mut W, header: &[u8], body: &[u8]) -> io::Result<()> {
  out.write_all(header)?;
  if body.first().is_some_and(|&byte| byte != b'\n') {
    out.write_all(b"\n")?;
  }
  out.write_all(body)
}
