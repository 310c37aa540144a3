//! Picking one instance out of a locator result.

use std::io::{BufRead, Write};

use anyhow::Result;
use inquire::Text;

use crate::instance::VisualStudioInstance;
use crate::ui::{Style, handle_prompt_cancellation};

/// Source of the user's answer when more than one instance matches.
pub trait SelectionInput {
    /// Reads one answer, or `None` when input ended or was cancelled.
    fn read_selection(&mut self, prompt: &str, output: &mut dyn Write) -> Result<Option<String>>;
}

/// Reads the answer as one line from any buffered reader.
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> SelectionInput for LineInput<R> {
    fn read_selection(&mut self, prompt: &str, output: &mut dyn Write) -> Result<Option<String>> {
        write!(output, "{prompt} ")?;
        output.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Reads the answer with an interactive terminal prompt.
pub struct PromptInput;

impl SelectionInput for PromptInput {
    fn read_selection(&mut self, prompt: &str, _output: &mut dyn Write) -> Result<Option<String>> {
        let answer = handle_prompt_cancellation(|| Ok(Text::new(prompt).prompt()?))?;
        Ok(answer.map(|a| a.trim().to_string()))
    }
}

/// Selects a single instance, asking only when there is a real choice.
pub struct Chooser<I, W> {
    input: I,
    output: W,
}

impl<I: SelectionInput, W: Write> Chooser<I, W> {
    pub const fn new(input: I, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the chosen instance.
    ///
    /// No instances yields `None` and one instance is returned without a
    /// prompt. Otherwise an enumerated list is written and a 1-based index
    /// is read; anything else reports the problem and yields `None`.
    pub fn choose(
        &mut self,
        mut instances: Vec<VisualStudioInstance>,
    ) -> Result<Option<VisualStudioInstance>> {
        match instances.len() {
            0 => return Ok(None),
            1 => return Ok(instances.pop()),
            _ => {}
        }

        for (index, instance) in instances.iter().enumerate() {
            writeln!(
                self.output,
                "{:>3}. {}  {}",
                Style::value(index + 1),
                Style::label(instance.label()),
                Style::secondary(&instance.installation_path)
            )?;
        }

        let prompt = format!("Select an instance [1-{}]:", instances.len());
        let Some(answer) = self.input.read_selection(&prompt, &mut self.output)? else {
            writeln!(self.output)?;
            return Ok(None);
        };

        match answer.parse::<usize>() {
            Ok(n) if (1..=instances.len()).contains(&n) => Ok(Some(instances.swap_remove(n - 1))),
            _ => {
                writeln!(
                    self.output,
                    "{} '{answer}' is not a number between 1 and {}.",
                    Style::error("Invalid selection:"),
                    instances.len()
                )?;
                Ok(None)
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
