use std::io;
use thiserror::Error;

/// Custom error types for the fish-recorder application
#[derive(Error, Debug)]
pub enum AppError {
    /// Error when API request fails
    #[error("API request failed: {0}")]
    ApiRequestFailed(String),

    /// Error when environment variable is not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Error when an environment variable holds a value we cannot use
    #[error("Invalid configuration for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },

    /// The terminal closed before a field was answered
    #[error("Input closed while waiting for: {0}")]
    InputClosed(String),

    /// Weather lookup attempted without a latitude/longitude pair
    #[error("Missing coordinates for weather lookup")]
    MissingCoordinates,

    /// Requested column is absent from the worksheet header row
    #[error("Column '{0}' not found in the worksheet")]
    ColumnNotFound(String),

    /// Header row does not line up with the record layout
    #[error("Worksheet header does not match the record layout: {0}")]
    SchemaMismatch(String),

    /// A per-field write ended with every column skipped
    #[error("Nothing was written to worksheet '{0}'")]
    NothingWritten(String),

    /// No spreadsheet with the configured name is visible to the credentials
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// Wrapper for reqwest errors
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Wrapper for I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}
