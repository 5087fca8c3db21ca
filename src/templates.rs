//! # Templates Module
//!
//! This module turns a header template into the literal text that is written
//! at the top of every processed file.
//!
//! The module includes:
//! - [`TemplateManager`] for loading and rendering header templates
//! - [`LicenseData`] for providing the values substituted into a template
//! - [`CommentStyle`] for selecting how the rendered text is wrapped as a
//!   comment
//!
//! ## Example
//!
//! ```rust
//! use copyright::templates::{CommentStyle, LicenseData, TemplateManager};
//!
//! let manager = TemplateManager::from_text("Copyright (c) $YEAR$ by $AUTHORS$.");
//! let data = LicenseData {
//!   years: "2025".to_string(),
//!   authors: "X".to_string(),
//! };
//!
//! let header = manager.render_header(&data, CommentStyle::Single);
//! assert_eq!(header, "// Copyright (c) 2025 by X.\n");
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::config::ConfigError;
use crate::verbose_log;

/// Placeholder replaced with [`LicenseData::years`].
pub const YEAR_PLACEHOLDER: &str = "$YEAR$";

/// Placeholder replaced with [`LicenseData::authors`].
pub const AUTHORS_PLACEHOLDER: &str = "$AUTHORS$";

/// Template used when no `--template` file is given.
pub const DEFAULT_TEMPLATE: &str = "Copyright (c) $YEAR$ by $AUTHORS$. All rights reserved.

This Source Code Form is subject to the terms of the Mozilla Public
License, version 2.0. If a copy of the MPL was not distributed with
this file, You can obtain one at http://mozilla.org/MPL/2.0/.

This Source Code Form is \"Incompatible With Secondary Licenses\", as
defined by the Mozilla Public License, version 2.0.";

/// Values substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseData {
  /// Free-form years text, e.g. `2025` or `2016-2025`
  pub years: String,
  /// Free-form copyright holder text
  pub authors: String,
}

/// The comment syntax used to wrap the header.
///
/// The same style also selects how an existing leading comment block is
/// recognized when a file is rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
  /// `// ...` line comments
  #[default]
  Single,
  /// `/* ... */` block comments
  Multi,
  /// `# ...` line comments
  Hash,
}

impl CommentStyle {
  /// The name used on the command line and in config files.
  pub const fn name(self) -> &'static str {
    match self {
      CommentStyle::Single => "single",
      CommentStyle::Multi => "multi",
      CommentStyle::Hash => "hash",
    }
  }

  /// Prefix written in front of every template line.
  pub const fn line_prefix(self) -> &'static str {
    match self {
      CommentStyle::Single => "//",
      CommentStyle::Multi => " *",
      CommentStyle::Hash => "#",
    }
  }

  /// Opening and closing marker lines, for block styles only.
  pub const fn block_markers(self) -> Option<(&'static str, &'static str)> {
    match self {
      CommentStyle::Multi => Some(("/*", " */")),
      CommentStyle::Single | CommentStyle::Hash => None,
    }
  }
}

impl fmt::Display for CommentStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Manager for loading and rendering header templates.
///
/// Rendering happens in two steps: [`render`](Self::render) substitutes the
/// placeholders, and [`format_with_comment_style`] wraps the result in
/// comment markers. [`render_header`](Self::render_header) does both.
#[derive(Debug, Clone)]
pub struct TemplateManager {
  template: String,
}

impl Default for TemplateManager {
  fn default() -> Self {
    Self::from_text(DEFAULT_TEMPLATE)
  }
}

impl TemplateManager {
  /// Creates a manager holding the built-in template.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a manager holding the given template text.
  pub fn from_text(template: impl Into<String>) -> Self {
    Self {
      template: template.into(),
    }
  }

  /// Replaces the current template with the contents of a file.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  /// - The path does not exist or cannot be read
  /// - The path is a directory
  /// - The file content is not valid UTF-8
  pub fn load_template(&mut self, path: &Path) -> Result<(), ConfigError> {
    verbose_log!("Loading template from: {}", path.display());

    let read_error = |source| ConfigError::TemplateRead {
      path: path.to_path_buf(),
      source,
    };

    if fs::metadata(path).map_err(read_error)?.is_dir() {
      return Err(ConfigError::TemplateIsDirectory {
        path: path.to_path_buf(),
      });
    }

    self.template = fs::read_to_string(path).map_err(read_error)?;

    verbose_log!("Template content:\n{}", self.template());

    Ok(())
  }

  /// The raw, unrendered template text.
  pub fn template(&self) -> &str {
    &self.template
  }

  /// Substitutes every `$YEAR$` and `$AUTHORS$` occurrence in the template.
  pub fn render(&self, data: &LicenseData) -> String {
    self
      .template
      .replace(YEAR_PLACEHOLDER, &data.years)
      .replace(AUTHORS_PLACEHOLDER, &data.authors)
  }

  /// Renders the template and wraps it in the given comment style.
  ///
  /// This is the exact text prepended to every processed file.
  pub fn render_header(&self, data: &LicenseData, style: CommentStyle) -> String {
    format_with_comment_style(&self.render(data), style)
  }
}

/// Wraps already-substituted text as a comment.
///
/// Each line is written as the style's prefix, a space, and the line text;
/// empty lines get the bare prefix with no trailing space. Block styles add
/// an opening and a closing marker line. Every emitted line ends with `\n`.
pub fn format_with_comment_style(text: &str, style: CommentStyle) -> String {
  let mut result = String::with_capacity(text.len() * 2);
  let markers = style.block_markers();

  if let Some((top, _)) = markers {
    result.push_str(top);
    result.push('\n');
  }

  let prefix = style.line_prefix();
  for line in text.lines() {
    result.push_str(prefix);
    if !line.is_empty() {
      result.push(' ');
      result.push_str(line);
    }
    result.push('\n');
  }

  if let Some((_, bottom)) = markers {
    result.push_str(bottom);
    result.push('\n');
  }

  result
}
