//! Help output that combines a command's own options with the external
//! tool's native help.

use std::io::{self, Write};

use crate::options::Options;
use crate::process::ProcessError;
use crate::ui::Style;

/// Writes usage, option descriptions, then the tool's help under `[label]`.
///
/// When the tool could not be run, a note takes the place of its help; the
/// command's own options are still shown.
pub fn write_help(
    out: &mut impl Write,
    usage: &str,
    options: &Options,
    tool_label: &str,
    tool_help: Result<Vec<String>, ProcessError>,
) -> io::Result<()> {
    writeln!(out, "{} {usage}", Style::header("Usage:"))?;
    writeln!(out)?;
    options.write_descriptions(out)?;
    writeln!(out)?;
    write_tool_help(out, tool_label, tool_help)
}

/// Writes the `[label]` header and the tool's help lines, or a note when the
/// tool could not be run.
pub fn write_tool_help(
    out: &mut impl Write,
    tool_label: &str,
    tool_help: Result<Vec<String>, ProcessError>,
) -> io::Result<()> {
    writeln!(out, "{}", Style::header(format!("[{tool_label}]")))?;

    match tool_help {
        Ok(lines) => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }
        Err(e) => {
            writeln!(out, "{}", Style::warning(format!("(help unavailable: {e})")))?;
        }
    }

    Ok(())
}
