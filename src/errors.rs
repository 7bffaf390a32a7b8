/*!
 * Error types for the srtlingo library.
 *
 * This module contains custom error types for the parsing pipeline and the
 * translation backends, using the thiserror crate for ergonomic error definitions.
 */

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::translation::LanguagePair;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors returned by a `Translator`
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The backend answered but produced no text
    #[error("Translator returned an empty response")]
    EmptyResponse,

    /// The language pair or request cannot be served
    #[error("Unsupported translation request: {0}")]
    Unsupported(String),
}

/// Errors surfaced by the parsing pipeline.
///
/// Every variant is a hard stop of the current parse: nothing is retried and
/// no partial caption list is returned.
#[derive(Error, Debug)]
pub enum ParserError {
    /// The raw text could not be obtained from its origin
    #[error("Subtitle source not found: {}", path.display())]
    SourceNotFound {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A block's timing line does not contain `HH:MM:SS,mmm --> HH:MM:SS,mmm`
    #[error("Invalid timing line in block {block}: {line:?}")]
    Parse {
        /// 1-based position of the block in the source
        block: usize,
        /// The offending timing line
        line: String,
    },

    /// Start time is not before end time (only raised when time order validation is enabled)
    #[error("Invalid time range in block {block}: {start} --> {end}")]
    InvalidTimeRange {
        /// 1-based position of the block in the source
        block: usize,
        /// Start timestamp as found in the source
        start: String,
        /// End timestamp as found in the source
        end: String,
    },

    /// A translation was requested but no translator was injected
    #[error("No translator configured for {0}")]
    MissingTranslator(LanguagePair),

    /// The translator failed while processing a caption
    #[error("Translation of block {block} failed: {source}")]
    Translation {
        /// 1-based position of the block in the source
        block: usize,
        /// Translator failure
        #[source]
        source: TranslationError,
    },
}

/// Application error type used by the command line front end
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the parsing pipeline
    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::File(error.to_string())
    }
}
