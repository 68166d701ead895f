//! Centralized error types for emlmetrics.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the emlmetrics library.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The path is empty, not valid UTF-8, or neither a file nor a directory.
    #[error(
        "Invalid path: '{0}'. Please check the provided path and ensure it is in the format \
         '/path_to_file/filename.eml'"
    )]
    InvalidPath(String),

    /// The specified path does not exist.
    #[error("The provided path does not exist: '{0}'")]
    PathNotFound(PathBuf),

    /// The path is a regular file without the `.eml` extension.
    #[error("Invalid email file path: '{0}'. Provided file is not an email file (.eml)")]
    NotEmailFile(PathBuf),

    /// The path is a directory without a single `.eml` entry.
    #[error("Invalid path: '{0}'. Directory does not contain any EML files")]
    NoEmailFilesInDirectory(PathBuf),

    /// Writing, reading or sniffing an attachment failed.
    #[error("Error processing attachment '{name}': {reason}")]
    AttachmentProcessing { name: String, reason: String },

    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file contents are not valid in the configured text encoding.
    #[error("Could not decode '{path}' as {encoding}")]
    Decode { path: PathBuf, encoding: String },

    /// The configured text encoding label is not known.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The MIME parser rejected a message.
    #[error("Failed to parse message '{0}'")]
    Parse(PathBuf),
}

/// Convenience alias for `Result<T, AnalyzerError>`.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an `AttachmentProcessing` variant.
    pub fn attachment(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::AttachmentProcessing {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
