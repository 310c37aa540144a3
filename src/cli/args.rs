use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vs")]
#[command(about = "Locate and modify Visual Studio installations")]
#[command(version)]
pub struct Args {
    /// Suppress status messages and tool output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show diagnostic logs on stderr
    #[arg(long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Locate installed instances (arguments are passed to vswhere)
    #[command(disable_help_flag = true)]
    Where {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Modify an installed instance (arguments are passed to the installer)
    #[command(disable_help_flag = true)]
    Modify {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Save a command line as an alias
    #[command(disable_help_flag = true)]
    Save {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a saved alias
    #[command(external_subcommand)]
    Alias(Vec<String>),
}

/// Rewrites a leading `-?`, `/?` or `-help` into clap's `--help`.
///
/// Only the first argument is touched; help flags after a subcommand are
/// handled by that command.
pub fn normalize_help_flag(mut argv: Vec<String>) -> Vec<String> {
    if let Some(first) = argv.get_mut(1)
        && matches!(first.as_str(), "-?" | "/?" | "-help")
    {
        *first = "--help".to_string();
    }
    argv
}
