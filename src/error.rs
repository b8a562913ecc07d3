//! Error types for cubecode.
//!
//! The text buffer itself never fails: it clamps. Errors come from the
//! collaborator-facing layers (level files, config text, script runs).

use std::fmt;
use std::io;

/// Result type alias for cubecode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cubecode operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading a level or config file.
    Io(io::Error),
    /// Invalid color token (neither a palette name nor `0xRRGGBBAA`).
    InvalidColor(String),
    /// Grid dimensions that cannot describe a cube.
    InvalidDimensions { x: i64, y: i64, z: i64 },
    /// Malformed line in a textual format (1-based line number).
    Parse { line: usize, message: String },
    /// The scripting engine rejected or failed to run user source.
    Script(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidColor(s) => write!(f, "invalid color: {s}"),
            Self::InvalidDimensions { x, y, z } => {
                write!(f, "invalid dimensions: {x}x{y}x{z}")
            }
            Self::Parse { line, message } => write!(f, "line {line}: {message}"),
            Self::Script(msg) => write!(f, "script error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidColor("purple-ish".to_string());
        assert!(err.to_string().contains("invalid color"));

        let err = Error::InvalidDimensions { x: -1, y: 2, z: 3 };
        assert!(err.to_string().contains("-1x2x3"));

        let err = Error::Parse {
            line: 7,
            message: "expected integer".to_string(),
        };
        assert_eq!(err.to_string(), "line 7: expected integer");

        let err = Error::Script("attempt to call a nil value".to_string());
        assert!(err.to_string().starts_with("script error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
