//! Expansion of saved command lines (`vs <alias> [args...]`).

use anyhow::Result;
use tracing::debug;

use crate::cli::CliError;
use crate::cli::args::Command;
use crate::config::{ConfigFile, ConfigManager};

/// Finds `name`, preferring the local file over the user configuration.
pub fn lookup<'a>(
    name: &str,
    local: &'a ConfigFile,
    global: &'a ConfigFile,
) -> Option<&'a [String]> {
    local.alias(name).or_else(|| global.alias(name))
}

/// Turns `[alias, args...]` into the saved command with `args` appended.
///
/// The result is always `where` or `modify`; a saved line is never expanded
/// a second time.
pub fn expand_with(
    argv: &[String],
    local: &ConfigFile,
    global: &ConfigFile,
) -> Result<Command, CliError> {
    let Some((name, rest)) = argv.split_first() else {
        return Err(CliError::UnknownCommand(String::new()));
    };
    let saved = lookup(name, local, global).ok_or_else(|| CliError::UnknownCommand(name.clone()))?;

    let Some((command, saved_args)) = saved.split_first() else {
        return Err(CliError::InvalidAlias(format!("alias '{name}' is empty")));
    };
    let args: Vec<String> = saved_args.iter().chain(rest).cloned().collect();

    match command.as_str() {
        "where" => Ok(Command::Where { args }),
        "modify" => Ok(Command::Modify { args }),
        other => Err(CliError::InvalidAlias(format!(
            "alias '{name}' runs '{other}', expected 'where' or 'modify'"
        ))),
    }
}

/// Expands an alias using `./.vs.toml` and the user configuration.
pub fn expand(argv: &[String]) -> Result<Command> {
    let local = ConfigManager::local()?.load_or_default()?;
    let global = ConfigManager::new()?.load_or_default()?;
    let command = expand_with(argv, &local, &global)?;
    debug!(?command, "expanded alias");
    Ok(command)
}
