//! Unified error types for `MoneyWise`.
//!
//! Quiz and calendar navigation never fail: invalid operations there are
//! rejected as no-ops. Everything that validates user input or reads a file
//! returns [`Result`] with one of these variants.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed, or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// An amount was negative, zero where it must be positive, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A category tag does not belong to the transaction kind's category set
    #[error("Category '{category}' is not valid for {kind} transactions")]
    InvalidCategory {
        /// The rejected category tag
        category: String,
        /// The transaction kind it was paired with
        kind: String,
    },

    /// A required field was empty
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// A date string was not a valid `YYYY-MM-DD` date
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        input: String,
    },

    /// The question bank failed structural validation
    #[error("Invalid question bank: {message}")]
    InvalidQuestionBank {
        /// Human-readable description of the problem
        message: String,
    },

    /// An age tier tag is not one of `8-12`, `13-17` or `18+`
    #[error("Unknown age tier '{tier}', expected 8-12, 13-17 or 18+")]
    UnknownAgeTier {
        /// The rejected tag
        tier: String,
    },

    /// A shell command could not be parsed
    #[error("Unknown command: {input}")]
    UnknownCommand {
        /// The input line, or the offending part of it
        input: String,
    },

    /// I/O error from reading config files or the terminal
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Formatting error while rendering shell output
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
