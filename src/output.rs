//! Global output configuration and utilities.
//!
//! This module provides centralized control over CLI output behavior,
//! including quiet mode, color support, and stderr/stdout routing.
//!
//! ## Design Principles
//!
//! - External tool output goes to stdout, line by line, as it arrives
//! - Status messages ("Running vswhere ...") go to stderr
//! - Errors always go to stderr
//! - Quiet mode suppresses status messages and tool echo
//! - Colors can be disabled via flag or NO_COLOR environment variable

use std::sync::OnceLock;

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl OutputConfig {
    /// Combines the `--quiet`/`--no-color` flags with `NO_COLOR`
    /// (<https://no-color.org/>), which disables color when set to anything
    /// but an empty string.
    pub fn new(quiet: bool, no_color: bool) -> Self {
        let env_no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            quiet,
            no_color: no_color || env_no_color,
        }
    }
}

/// Sets the configuration for this process.
///
/// Only the first call takes effect; commands read it through
/// [`is_quiet`] and [`is_no_color`].
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr (respects quiet mode).
///
/// Use this for progress indicators, informational messages, etc.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a line of external tool output to stdout (respects quiet mode).
#[macro_export]
macro_rules! echo {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            println!($($arg)*);
        }
    };
}

/// Print a warning message to stderr (always shown, even in quiet mode).
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}
