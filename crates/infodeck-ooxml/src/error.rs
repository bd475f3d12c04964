//! Error types for package operations

use thiserror::Error;

/// Errors that can occur while reading, editing or writing a package
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute in an XML part
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Required part not found in the package
    #[error("Required part not found: {0}")]
    MissingPart(String),

    /// Invalid part content
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// Package invariants do not hold (dangling target, untyped part, id clash)
    #[error("Package integrity violation: {0}")]
    Integrity(String),
}

impl OoxmlError {
    /// Create an integrity violation error
    pub fn integrity(reason: impl Into<String>) -> Self {
        Self::Integrity(reason.into())
    }
}

/// Result type for package operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
