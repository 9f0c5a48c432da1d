//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must either have defaults or fail
//! with a clear error message. Prompt text goes to stderr so stdout stays
//! clean for command output.

use std::io::{BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode; pass the value as a flag instead")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Prompt for text input.
///
/// Returns the entered text, or the default (if any) on empty input.
/// Returns `Err(PromptError::NotInteractive)` if not in interactive mode
/// and `Err(PromptError::Cancelled)` on end of input.
pub fn input(
    message: &str,
    default: Option<&str>,
    interactive: bool,
) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    loop {
        match default {
            Some(d) => eprint!("{} [{}]: ", message, d),
            None => eprint!("{}: ", message),
        }
        flush_stderr()?;

        let line = read_line()?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if let Some(d) = default {
                return Ok(d.to_string());
            }
            continue;
        }
        return Ok(trimmed.to_string());
    }
}

/// Prompt for confirmation (yes/no).
///
/// Returns `Ok(true)` if the user confirms, `Ok(false)` if they decline.
/// Empty input selects the default.
pub fn confirm(message: &str, default: bool, interactive: bool) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        eprint!("{} ({}): ", message, hint);
        flush_stderr()?;

        let line = read_line()?;
        match line.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => eprintln!("please answer 'yes' or 'no', not '{}'", other),
        }
    }
}

fn flush_stderr() -> Result<(), PromptError> {
    std::io::stderr()
        .flush()
        .map_err(|e| PromptError::IoError(e.to_string()))
}

fn read_line() -> Result<String, PromptError> {
    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| PromptError::IoError(e.to_string()))?;
    if read == 0 {
        return Err(PromptError::Cancelled);
    }
    Ok(line)
}
