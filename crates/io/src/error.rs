use thiserror::Error;

/// Result type for IO operations
pub type Result<T> = std::result::Result<T, IoError>;

/// Errors that can occur at the filesystem edges
#[derive(Error, Debug)]
pub enum IoError {
    /// Underlying filesystem error
    #[error("IO error: {0}")]
    FileError(#[from] std::io::Error),

    /// Unreadable or malformed zip archive
    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    /// Malformed delimited data
    #[error("Tabular data error: {0}")]
    TabularError(#[from] csv::Error),
}
