//! Error types for unword library.

use std::io;
use thiserror::Error;

/// Result type alias for unword operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as a Word package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// A required part of the package is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// The zip container is corrupted or unreadable.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Error parsing one of the XML parts.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error writing the spreadsheet report.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// A batch was started without any input documents.
    #[error("No documents supplied")]
    EmptyBatch,
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::InvalidArchive(_) => Error::UnknownFormat,
            zip::result::ZipError::FileNotFound => Error::MissingPart("requested entry".into()),
            _ => Error::Archive(err.to_string()),
        }
    }
}
