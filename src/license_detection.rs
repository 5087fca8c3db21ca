//! # License Detection Module
//!
//! Decides whether a file's leading comment block is a copyright notice that
//! may be replaced, or some other comment (a build constraint, an SPDX tag, a
//! package doc) that must be kept.

/// Trait for copyright notice detectors.
pub trait LicenseDetector: Send + Sync {
  /// Returns `true` if `block` looks like an existing copyright notice.
  ///
  /// `block` is the raw leading comment block of a file, possibly empty.
  fn has_license(&self, block: &[u8]) -> bool;
}

/// Matches the substring `opyright`.
///
/// This finds both "Copyright" and "copyright" without lowercasing the input.
/// Text spelled entirely in capitals ("COPYRIGHT") does not match.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyrightSubstringDetector;

impl CopyrightSubstringDetector {
  /// The byte sequence searched for.
  pub const NEEDLE: &'static [u8] = b"opyright";

  pub const fn new() -> Self {
    CopyrightSubstringDetector
  }
}

impl LicenseDetector for CopyrightSubstringDetector {
  fn has_license(&self, block: &[u8]) -> bool {
    block.windows(Self::NEEDLE.len()).any(|window| window == Self::NEEDLE)
  }
}
