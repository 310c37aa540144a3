use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Wraps a function that uses interactive prompts and handles user cancellation gracefully.
///
/// If the user cancels the prompt (Ctrl+C or Escape), this function prints a newline
/// to clean up the terminal and returns `Ok(None)` instead of propagating the error.
pub fn handle_prompt_cancellation<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
