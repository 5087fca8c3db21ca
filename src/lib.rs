//! # copyright
//!
//! A tool that inserts a copyright notice at the top of source files, or
//! replaces the one that is already there.
//!
//! For every file whose extension is selected, the leading comment block is
//! located using the configured comment style. If that block mentions a
//! copyright it is discarded; otherwise it is kept below the new header.
//! Running the tool twice with the same settings gives the same files.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use copyright::file_filter::ExtensionFilter;
//! use copyright::processor::{Processor, ProcessorConfig};
//! use copyright::templates::{CommentStyle, LicenseData, TemplateManager};
//!
//! fn main() -> anyhow::Result<()> {
//!     let license_data = LicenseData {
//!         years: "2016-2025".to_string(),
//!         authors: "Jane Doe".to_string(),
//!     };
//!
//!     let header = TemplateManager::new().render_header(&license_data, CommentStyle::Single);
//!     let extensions = ExtensionFilter::parse("go,rs")?;
//!
//!     let processor = Processor::new(ProcessorConfig::new(header, CommentStyle::Single, Box::new(extensions)));
//!     let summary = processor.process(&[PathBuf::from("src")])?;
//!
//!     println!("Updated {} files", summary.updated_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Walking targets and rewriting files
//! * [`templates`] - Header templates and comment styles
//! * [`config`] - Config file loading and settings resolution
//! * [`logging`] - Console output and tracing setup

pub mod config;
pub mod file_filter;
pub mod license_detection;
pub mod logging;
pub mod processor;
pub mod report;
pub mod templates;
