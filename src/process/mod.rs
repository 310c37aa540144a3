//! External tool invocation and output streaming.
//!
//! Every call to the locator or installer goes through [`ProcessRunner`]:
//! the tool's stdout becomes a lazy stream of lines, each line is echoed as
//! soon as it arrives, and in JSON mode the same lines are buffered and
//! decoded into [`VisualStudioInstance`] records once the stream ends.

mod lines;
mod runner;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::instance::VisualStudioInstance;

pub use lines::line_stream;
pub use runner::{ProcessRunner, consume_lines};

/// Advisory emitted when JSON output could not be decoded.
pub const JSON_PARSE_FAILURE: &str = "Failed to parse JSON from vswhere output.";

/// Failures that stop a command.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read output from {program}: {source}")]
    Read {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} did not finish within {secs}s and was terminated")]
    TimedOut { program: String, secs: u64 },
}

/// How the runner treats stdout after echoing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Lines are echoed and dropped.
    Plain,
    /// Lines are echoed and also decoded as one JSON array at EOF.
    Json,
}

impl OutputMode {
    /// Picks JSON mode when [`wants_json`] matches the raw arguments.
    pub fn detect<S: AsRef<str>>(args: &[S]) -> Self {
        if wants_json(args) {
            Self::Json
        } else {
            Self::Plain
        }
    }
}

/// Whether the caller asked the locator for JSON output.
///
/// This is a loose textual check: the arguments are joined with `=` and
/// searched case-insensitively for `-format=json`, so `-format json`,
/// `-format=json` and `-Format=JSON` all match.
pub fn wants_json<S: AsRef<str>>(args: &[S]) -> bool {
    args.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("=")
        .to_ascii_lowercase()
        .contains("-format=json")
}

/// One external tool call: the program and its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// The bare file name of the program, for messages.
    pub fn program_name(&self) -> String {
        self.program.file_name().map_or_else(
            || self.program.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        )
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program_name())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of one run: exit code plus whatever JSON decoding produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutcome {
    pub exit_code: i32,
    pub instances: Vec<VisualStudioInstance>,
    /// Set when JSON mode was requested and the output did not decode.
    pub advisory: Option<String>,
}

impl RunOutcome {
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_json_attached() {
        assert!(wants_json(&["-all", "-format=json"]));
        assert!(wants_json(&["-FORMAT=Json"]));
    }

    #[test]
    fn test_wants_json_separate_tokens() {
        assert!(wants_json(&["-format", "json"]));
    }

    #[test]
    fn test_wants_json_absent() {
        assert!(!wants_json(&["-format", "text"]));
        assert!(!wants_json(&["json"]));
        assert!(!wants_json::<&str>(&[]));
    }

    #[test]
    fn test_output_mode_detect() {
        assert_eq!(OutputMode::detect(&["-format=json"]), OutputMode::Json);
        assert_eq!(OutputMode::detect(&["-latest"]), OutputMode::Plain);
    }

    #[test]
    fn test_invocation_display() {
        let invocation = Invocation::new("/opt/tools/vswhere.exe")
            .arg("-nologo")
            .args(["-products", "Microsoft.VisualStudio.Product.Community"]);
        assert_eq!(
            invocation.to_string(),
            "vswhere.exe -nologo -products Microsoft.VisualStudio.Product.Community"
        );
        assert_eq!(invocation.get_args().len(), 3);
    }
}
