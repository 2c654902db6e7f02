#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use apiflow_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// The document could not be parsed.
    #[display("{}", _0)]
    Parse(AppError),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_keep_their_message() {
        let err: CliError = AppError::Structural("path must begin with a /".into()).into();
        assert_eq!(err.to_string(), "Invalid Swagger, path must begin with a /");
    }

    #[test]
    fn test_io_conversion() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("IO Error:"));
    }
}
