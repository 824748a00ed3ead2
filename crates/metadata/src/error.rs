use thiserror::Error;

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Errors that can occur while reading or writing metadata XML
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Malformed XML reported by the underlying reader or writer
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Document ended before an open element was closed
    #[error("Document ended inside element `{0}`")]
    Truncated(String),

    /// The payload contained no root element at all
    #[error("No root element found")]
    MissingRoot,

    /// Profile entries hold flat name/value pairs; anything deeper is
    /// out of scope for this document model
    #[error("Unexpected nested element `{child}` inside `{parent}`")]
    NestedElement { parent: String, child: String },
}
