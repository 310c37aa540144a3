use std::io::{self, Write};

use anyhow::Result;
use tracing::debug;

use crate::cli::CliError;
use crate::config::{ConfigManager, validate_alias_name};
use crate::options::{CommandDescriptor, OptionError, Options, ParsedArgs, sets};
use crate::status;
use crate::ui::Style;

/// Commands a saved alias may run.
pub const SAVABLE_COMMANDS: &[&str] = &["where", "modify"];

/// A parsed `vs save` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveDescriptor {
    pub alias: Option<String>,
    pub global: bool,
    pub extra_arguments: Vec<String>,
    pub help: bool,
}

impl CommandDescriptor for SaveDescriptor {
    fn options() -> Result<Options, OptionError> {
        sets::save()?.with(sets::global()?)
    }

    fn from_parsed(parsed: ParsedArgs) -> Result<Self, OptionError> {
        Ok(Self {
            alias: parsed.last("alias").map(str::to_string),
            global: parsed.flag("global"),
            help: parsed.help_requested(),
            extra_arguments: parsed.into_extra(),
        })
    }
}

impl SaveDescriptor {
    /// The alias name and the command line to store under it.
    pub fn entry(&self) -> Result<(&str, &[String]), CliError> {
        let name = self
            .alias
            .as_deref()
            // Reported under the spelling the usage line shows.
            .ok_or_else(|| OptionError::Required("save".to_string()))?;
        validate_alias_name(name).map_err(|e| CliError::InvalidAlias(format!("{e:#}")))?;

        match self.extra_arguments.first() {
            Some(cmd) if SAVABLE_COMMANDS.contains(&cmd.as_str()) => {
                Ok((name, &self.extra_arguments))
            }
            Some(cmd) => Err(CliError::InvalidAlias(format!(
                "'{cmd}' cannot be saved; a saved command starts with 'where' or 'modify'"
            ))),
            None => Err(CliError::InvalidAlias(format!(
                "Nothing to save: alias '{name}' needs a command line"
            ))),
        }
    }
}

fn write_save_help(out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{} vs save --save=NAME [-g] <where|modify> [arguments]",
        Style::header("Usage:")
    )?;
    writeln!(out)?;
    SaveDescriptor::options()?.write_descriptions(out)?;
    Ok(())
}

pub fn run_save(args: Vec<String>) -> Result<i32> {
    let descriptor = SaveDescriptor::parse(args)?;

    if descriptor.help {
        write_save_help(&mut io::stdout().lock())?;
        return Ok(0);
    }

    let (name, command) = descriptor.entry()?;
    let manager = if descriptor.global {
        ConfigManager::new()?
    } else {
        ConfigManager::local()?
    };

    let mut config = manager.load_or_default()?;
    let replaced = config.set_alias(name, command.to_vec())?;
    manager.save(&config)?;
    debug!(path = %manager.config_path().display(), replaced = replaced.is_some(), "alias saved");

    status!(
        "{} Saved '{}' as {}",
        Style::success("✓"),
        Style::value(name),
        Style::command(command.join(" "))
    );
    Ok(0)
}
