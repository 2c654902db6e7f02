#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only fatal conditions are represented here. Unresolved references,
//! unknown auth scheme types and unknown constraint keywords degrade to a
//! sentinel value instead of an error.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The buffer decoded neither as JSON nor as YAML.
    #[from(ignore)]
    #[display("Invalid Swagger File format (invalid JSON or YAML)\nJSON Error: {json}\nYAML Error: {yaml}")]
    InvalidFormat {
        /// Error reported by the JSON decoder.
        json: String,
        /// Error reported by the YAML decoder.
        yaml: String,
    },

    /// The document decoded but failed the Swagger 2.0 validity check.
    #[from(ignore)]
    #[display("Invalid Swagger File (invalid schema / version < 2.0):\n{_0}")]
    InvalidDocument(String),

    /// A structural rule of the document was violated during parsing.
    #[from(ignore)]
    #[display("Invalid Swagger, {_0}")]
    Structural(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
