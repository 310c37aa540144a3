//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. All helpers
//! fall back to plain text when colors are disabled.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    fn paint<T: Display>(text: T, styled: impl FnOnce(&T) -> String) -> String {
        if output::is_no_color() {
            text.to_string()
        } else {
            styled(&text)
        }
    }

    /// Style for section headers (e.g., "Usage", "Options")
    pub fn header<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.bold()))
    }

    /// Style for instance labels in selection lists
    pub fn label<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.dimmed()))
    }

    /// Style for primary values (e.g., list indices, alias names)
    pub fn value<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.cyan()))
    }

    /// Style for secondary/supplementary info (e.g., installation paths)
    pub fn secondary<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.dimmed()))
    }

    /// Style for success messages
    pub fn success<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.green()))
    }

    /// Style for error messages
    pub fn error<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.red().bold()))
    }

    /// Style for warning messages
    pub fn warning<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.yellow()))
    }

    /// Style for command lines echoed back to the user
    pub fn command<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.green()))
    }
}
