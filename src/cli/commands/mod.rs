//! Subcommand implementations.

/// Saved alias expansion.
pub mod alias;

/// Modify command handler.
pub mod modify;

/// Save command handler.
pub mod save;

/// Where command handler.
pub mod where_cmd;

use anyhow::Result;

use crate::cli::args::Command;
use crate::cli::context::AppContext;
use crate::cli::CliError;

/// Runs `command` and returns the process exit code.
pub async fn dispatch(command: Command, ctx: &AppContext) -> Result<i32> {
    let command = match command {
        Command::Alias(argv) => alias::expand(&argv)?,
        other => other,
    };

    match command {
        Command::Where { args } => where_cmd::run_where(ctx, args).await,
        Command::Modify { args } => modify::run_modify(ctx, args).await,
        Command::Save { args } => save::run_save(args),
        Command::Alias(argv) => Err(CliError::UnknownCommand(argv.join(" ")).into()),
    }
}
