//! Error types for SVG parsing and normalization.

use thiserror::Error;

/// Result type for SVG operations
pub type Result<T> = std::result::Result<T, SvgError>;

/// Errors that can occur while reading or rewriting an SVG document
#[derive(Error, Debug)]
pub enum SvgError {
    /// Low-level XML error reported by the reader or writer
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Attribute could not be read (duplicate, missing quotes, ...)
    #[error("Attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Document is structurally unusable (unclosed tags, unbound prefix, no root)
    #[error("Malformed document: {reason}")]
    Malformed { reason: String },

    /// I/O error while serializing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl SvgError {
    /// Create a malformed document error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = SvgError::malformed("unclosed <g>");
        assert!(err.to_string().contains("unclosed <g>"));
    }
}
