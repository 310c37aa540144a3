//! Command-line interface definitions and handlers.

use thiserror::Error;

use crate::options::OptionError;
use crate::process::ProcessError;

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

/// Shared per-invocation state.
pub mod context;

/// Combined command and tool help.
pub mod help;

pub use args::{Args, Command, normalize_help_flag};
pub use context::AppContext;

/// Usage errors raised above the option layer.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Option(#[from] OptionError),

    #[error("unknown command or alias '{0}'")]
    UnknownCommand(String),

    #[error("{0}")]
    InvalidAlias(String),
}

/// Exit code for a clap parse result that did not produce [`Args`]:
/// 0 for help and version output, `USAGE` for everything else.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
        _ => exitcode::USAGE,
    }
}

/// Maps a failed command to its process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.is::<OptionError>() || cause.is::<CliError>() {
            return exitcode::USAGE;
        }
        if let Some(ProcessError::Launch { .. }) = cause.downcast_ref::<ProcessError>() {
            return exitcode::UNAVAILABLE;
        }
    }
    exitcode::SOFTWARE
}
