//! # Logging Module
//!
//! Console output for the copyright tool:
//! - [`info_log!`](crate::info_log) for progress lines such as `Updated
//!   <path>`, written to stdout and suppressed in quiet mode
//! - [`verbose_log!`](crate::verbose_log) for extra detail on stderr when
//!   `-v` is given
//! - [`init_tracing`] for the structured `tracing` diagnostics used inside
//!   the library
//!
//! ## Example
//!
//! ```rust
//! use copyright::logging::{ColorMode, set_verbose};
//! use copyright::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Scanning: {}", "src");
//! info_log!("Updated {}", "src/main.go");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info line to stdout, in yellow when the terminal supports it.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
