//! Error types for reviewlist.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and `From`
//! conversions up to [`AppError`], which is what `main` returns.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`ConfigError`] - Config file could not be read or parsed (fatal at startup)
//!   - [`LoggingError`] - Tracing subscriber could not be installed (fatal at startup)
//!   - [`SourceError`] - Review fixture could not be loaded (fatal at startup)
//!   - `std::io::Error` - Terminal failures
//! - [`PageError`] - A single page load failed. Never fatal.
//!   - [`DecodeError`] - Malformed page payload
//!   - [`TransportError`] - The page could not be fetched
//! - [`ImageLoadError`] - Avatar or photo could not be loaded. Never fatal.
//!
//! # Error Recovery Strategy
//!
//! Page errors are absorbed by the pagination state machine: the loading indicator stops and
//! the next scroll gesture may retry. Nothing is shown in the row list. Image errors resolve
//! to a placeholder and never affect row height.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::identifiers::ResourceId;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// Everything returned here stops the binary. Recoverable failures (pages, images) have their
/// own types and are handled where they occur.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file exists but could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The review data source could not be opened.
    #[error("Failed to open review source: {0}")]
    Source(#[from] SourceError),

    /// Terminal or TUI rendering error.
    ///
    /// Fatal: the application restores the terminal and exits.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when opening a review fixture file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The fixture file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use reviewlist::model::error::SourceError;
    ///
    /// let err = SourceError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// No fixture was given on the command line or in the config file.
    #[error("No review source: pass a fixture file or set `data_file` in the config")]
    NoInput,

    /// The fixture file is not a valid review page.
    #[error("Invalid fixture {path}: {source}")]
    Decode {
        /// Fixture path.
        path: PathBuf,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },

    /// Generic I/O error while reading the fixture.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page payload could not be decoded into a [`ReviewPage`](crate::model::ReviewPage).
///
/// Carries the serde message plus position so the log line points at the offending byte.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid page payload at line {line}, column {column}: {message}")]
pub struct DecodeError {
    /// Human-readable serde message.
    pub message: String,
    /// 1-based line of the failure (0 when unknown).
    pub line: usize,
    /// 1-based column of the failure (0 when unknown).
    pub column: usize,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// A page could not be fetched from the review source.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The source has no data for the requested offset.
    #[error("No page available at offset {offset}")]
    PageUnavailable {
        /// Requested offset.
        offset: usize,
    },

    /// The source was reachable but the transfer failed.
    #[error("Transfer failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one page load. Always absorbed by the pagination controller.
#[derive(Debug, Error)]
pub enum PageError {
    /// Payload was fetched but could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Payload could not be fetched.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Soft failure of an avatar or photo load. Renderers fall back to a placeholder.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    /// No image exists for the identifier.
    #[error("No image for {0}")]
    NotFound(ResourceId),

    /// Reading the image bytes failed.
    #[error("Failed to read image {id}: {source}")]
    Io {
        /// Requested identifier.
        id: ResourceId,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Bytes were read but are not a supported image.
    #[error("Failed to decode image {id}: {reason}")]
    Decode {
        /// Requested identifier.
        id: ResourceId,
        /// Decoder message.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_from_serde_keeps_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"items\": [,]\n}").unwrap_err();
        let decode: DecodeError = err.into();
        assert_eq!(decode.line, 2);
        assert!(decode.column > 0);
        assert!(decode.to_string().contains("line 2"));
    }

    #[test]
    fn page_error_is_transparent_over_transport() {
        let err: PageError = TransportError::PageUnavailable { offset: 40 }.into();
        assert_eq!(err.to_string(), "No page available at offset 40");
    }

    #[test]
    fn page_error_is_transparent_over_decode() {
        let err: PageError = DecodeError {
            message: "expected value".to_string(),
            line: 1,
            column: 3,
        }
        .into();
        assert!(err.to_string().starts_with("Invalid page payload at line 1, column 3"));
    }

    #[test]
    fn image_load_error_mentions_resource() {
        let err = ImageLoadError::NotFound(ResourceId::new("avatars/1.png").unwrap());
        assert!(err.to_string().contains("avatars/1.png"));
    }

    #[test]
    fn app_error_wraps_source_error() {
        let err: AppError = SourceError::NoInput.into();
        assert!(matches!(err, AppError::Source(SourceError::NoInput)));
        assert!(err.to_string().contains("No review source"));
    }
}
