//! Error types for ytstat
//!
//! This module defines the error types used throughout the ytstat library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! Note that a channel having no uploads inside the requested date range is
//! deliberately NOT an error; that state is modeled as
//! [`crate::aggregation::ChannelOutcome::Empty`].

use thiserror::Error;

use crate::types::ChannelId;

/// Main error type for ytstat operations
///
/// This enum encompasses all possible errors that can occur during ytstat
/// operations, from API failures to date parsing and spreadsheet export
/// issues.
#[derive(Error, Debug)]
pub enum YtstatError {
    /// API key was rejected or missing
    #[error("Authentication failed (HTTP {status}): check the API key")]
    Auth {
        /// HTTP status returned by the platform
        status: u16,
    },

    /// Channel ID did not resolve to any channel
    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    /// Any other platform API failure
    #[error("YouTube API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status returned by the platform
        status: u16,
        /// Response body or error description
        message: String,
    },

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet serialization error
    #[error("Spreadsheet export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Convenience type alias for Results in ytstat
///
/// # Example
///
/// ```
/// use ytstat::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, YtstatError>;
