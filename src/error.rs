//! Error types for folio library.

use std::io;
use thiserror::Error;

/// Result type alias for folio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised around the placement engine.
///
/// The engine itself never fails; these cover loading and validating its
/// inputs and serializing its output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Font data could not be parsed.
    #[error("Font parsing error: {0}")]
    FontParse(String),

    /// A layout description could not be parsed.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Theme configuration is malformed.
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error while rendering placement results.
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidLayout("unknown role 'cover'".into());
        assert_eq!(err.to_string(), "Invalid layout: unknown role 'cover'");

        let err = Error::InvalidTheme("footer font size must be positive".into());
        assert_eq!(
            err.to_string(),
            "Invalid theme: footer font size must be positive"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
