use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fs::atomic_write;
use crate::paths;

/// Command names an alias may not shadow.
const RESERVED_NAMES: &[&str] = &["where", "modify", "save", "help"];

/// Default settings in the `[vs]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VsConfig {
    /// Suppress status messages and tool echo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,
    /// Kill external tools that run longer than this many seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Explicit tool locations in the `[tools]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installer: Option<PathBuf>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/vs/config.toml`; a local `.vs.toml` uses the
/// same layout but only its `[aliases]` are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub vs: VsConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Saved command lines keyed by alias name.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl ConfigFile {
    pub fn alias(&self, name: &str) -> Option<&[String]> {
        self.aliases.get(name).map(Vec::as_slice)
    }

    /// Stores `args` under `name`, returning the command it replaced.
    pub fn set_alias(&mut self, name: &str, args: Vec<String>) -> Result<Option<Vec<String>>> {
        validate_alias_name(name)?;
        if args.is_empty() {
            bail!("Nothing to save: alias '{name}' needs a command line");
        }
        Ok(self.aliases.insert(name.to_string(), args))
    }
}

/// Validates an alias name: ASCII letters, digits, `-` and `_`, not a command.
pub fn validate_alias_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Alias name cannot be empty");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        bail!("Invalid alias name '{name}': use letters, digits, '-' and '_' only");
    }
    if name.starts_with('-') {
        bail!("Invalid alias name '{name}': cannot start with '-'");
    }
    if RESERVED_NAMES.contains(&name) {
        bail!("Invalid alias name '{name}': it is a built-in command");
    }
    Ok(())
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub quiet: bool,
}

/// Settings after merging CLI flags, the config file and built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub quiet: bool,
    pub timeout: Option<Duration>,
    pub locator: PathBuf,
    pub installer: PathBuf,
}

/// Resolves configuration; tools default to files in `tool_dir`.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
    tool_dir: &Path,
) -> ResolvedConfig {
    let locator = config_file
        .tools
        .locator
        .clone()
        .unwrap_or_else(|| tool_dir.join(paths::tool_file_name(paths::LOCATOR_NAME)));
    let installer = config_file
        .tools
        .installer
        .clone()
        .unwrap_or_else(|| tool_dir.join(paths::tool_file_name(paths::INSTALLER_NAME)));

    ResolvedConfig {
        quiet: options.quiet || config_file.vs.quiet.unwrap_or(false),
        timeout: config_file
            .vs
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        locator,
        installer,
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the user configuration.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/vs/config.toml`
    /// or `~/.config/vs/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a manager for `.vs.toml` in the current directory.
    pub fn local() -> Result<Self> {
        Ok(Self {
            config_path: paths::local_config_file()?,
        })
    }

    pub const fn at(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    /// Loads the file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents)
    }
}
