//! Error types for unnotion library.

use std::io;
use thiserror::Error;

/// Result type alias for unnotion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding or rendering block content.
///
/// Only the decoding boundary produces errors. Formatting spans and
/// building the display tree are total over any decoded input.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not well-formed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is JSON but not a recognizable block payload.
    #[error("Unknown input format: expected a block list, list response, or block object")]
    UnknownFormat,

    /// A block record could not be decoded (strict mode only).
    #[error("Invalid block at index {index}: {reason}")]
    InvalidBlock {
        /// Position of the record in the input sequence
        index: usize,
        /// Why the record was rejected
        reason: String,
    },

    /// Error during rendering (HTML, Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
