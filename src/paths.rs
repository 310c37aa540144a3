//! Path resolution for configuration files and the bundled tools.
//!
//! Configuration follows XDG conventions on every platform. The locator and
//! installer are looked up next to the running executable, never on `PATH`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default locator executable stem.
pub const LOCATOR_NAME: &str = "vswhere";

/// Default installer executable stem.
pub const INSTALLER_NAME: &str = "vs_installer";

/// File name of the per-directory configuration holding local aliases.
pub const LOCAL_CONFIG_FILE: &str = ".vs.toml";

/// Returns the configuration directory for vs.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/vs` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/vs` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(xdg) => Ok(PathBuf::from(xdg).join("vs")),
        None => Ok(home_dir()?.join(".config").join("vs")),
    }
}

/// Returns the local configuration file for the current directory.
pub fn local_config_file() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(LOCAL_CONFIG_FILE))
}

/// Directory holding the running executable, where the tools are shipped.
pub fn tool_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("The running executable has no parent directory")
}

/// Platform file name for a tool stem (`vswhere` becomes `vswhere.exe` on Windows).
pub fn tool_file_name(stem: &str) -> String {
    format!("{stem}{}", std::env::consts::EXE_SUFFIX)
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
