use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the quire library.
///
/// Every variant is fatal to a run: the pipeline stops at the first error and
/// propagates it unchanged.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },

    /// YAML parsing or serialization error.
    #[error("YAML error: {message}")]
    Yaml {
        /// Error message
        message: String,
    },

    /// Invalid UTF-8 encountered in a source file.
    #[error("Invalid UTF-8 encoding in file '{path}'. Source fragments must be UTF-8 text.")]
    InvalidUtf8 {
        /// Path to file with encoding issues
        path: PathBuf,
    },

    /// An average was requested over a collection with no members.
    #[error("Cannot compute an average over an empty collection: {what}")]
    EmptyCollection {
        /// Human-readable description of the empty collection
        what: String,
    },
}

impl Error {
    /// Creates an IO error with path context.
    ///
    /// Non-UTF-8 reads are reported as [`Error::InvalidUtf8`] instead.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::InvalidData {
            return Self::InvalidUtf8 { path };
        }
        Self::Io {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an empty collection error.
    #[must_use]
    pub fn empty_collection(what: impl Into<String>) -> Self {
        Self::EmptyCollection { what: what.into() }
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns true if this is an empty collection error.
    #[must_use]
    pub const fn is_empty_collection(&self) -> bool {
        matches!(self, Self::EmptyCollection { .. })
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml {
            message: e.to_string(),
        }
    }
}
