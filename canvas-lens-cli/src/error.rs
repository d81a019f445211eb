//! Error handling for the canvas-lens CLI
//!
//! Preserves error context while carrying the exit code a failure
//! should produce.

use std::error::Error;
use std::fmt;

use crate::exit_codes::{EXIT_CONFIG, EXIT_ERROR};

/// CLI-specific result type.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error: a message plus the exit code to terminate with.
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create an error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Wrap another error with a specific exit code.
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// General error (exit code 1).
    pub fn general<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::from_error(error, EXIT_ERROR)
    }

    /// Configuration error (exit code 2).
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(message, EXIT_CONFIG)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<canvas_lens::Error> for CliError {
    fn from(error: canvas_lens::Error) -> Self {
        let exit_code = match &error {
            canvas_lens::Error::Config(_) => EXIT_CONFIG,
            _ => EXIT_ERROR,
        };
        Self::from_error(error, exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_to_exit_code_2() {
        let err: CliError = canvas_lens::Error::Config("missing CANVAS_API_TOKEN".into()).into();
        assert_eq!(err.exit_code, EXIT_CONFIG);

        let err: CliError = canvas_lens::Error::Api {
            status: 500,
            body: "oops".into(),
        }
        .into();
        assert_eq!(err.exit_code, EXIT_ERROR);
    }
}
