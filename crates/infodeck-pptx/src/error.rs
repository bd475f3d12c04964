//! Error types for PPTX generation and patching.

use infodeck_ooxml::OoxmlError;
use thiserror::Error;

/// Result type for PPTX operations
pub type Result<T> = std::result::Result<T, PptxError>;

/// Errors that can occur while building or patching a presentation
#[derive(Error, Debug)]
pub enum PptxError {
    /// Template file not found or inaccessible
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// Template is missing parts the patcher needs
    #[error("Invalid template: {reason}")]
    InvalidTemplate { reason: String },

    /// Asset cannot be embedded
    #[error("Image error: {reason}")]
    ImageError { reason: String },

    /// Package-level error (zip, relationships, content types, validation)
    #[error(transparent)]
    Package(#[from] OoxmlError),

    /// XML generation or parsing error
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PptxError {
    /// Create a template not found error
    pub fn template_not_found(path: impl Into<String>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// Create an invalid template error
    pub fn invalid_template(reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            reason: reason.into(),
        }
    }

    /// Create an image error
    pub fn image_error(reason: impl Into<String>) -> Self {
        Self::ImageError {
            reason: reason.into(),
        }
    }

    /// True when the package invariants were violated
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::Package(OoxmlError::Integrity(_)))
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound { .. } => "PPTX001",
            Self::InvalidTemplate { .. } => "PPTX002",
            Self::ImageError { .. } => "PPTX003",
            Self::Package(OoxmlError::Integrity(_)) => "PPTX004",
            Self::Package(_) => "PPTX005",
            Self::XmlError(_) => "PPTX006",
            Self::IoError(_) => "PPTX007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PptxError::template_not_found("deck.potx");
        assert_eq!(err.code(), "PPTX001");
        assert!(err.to_string().contains("deck.potx"));

        let err = PptxError::from(OoxmlError::integrity("rId2 already exists"));
        assert_eq!(err.code(), "PPTX004");
        assert!(err.is_integrity_violation());
        assert!(err.to_string().contains("rId2"));
    }

    #[test]
    fn test_non_integrity_package_error() {
        let err = PptxError::from(OoxmlError::MissingPart("ppt/presentation.xml".into()));
        assert_eq!(err.code(), "PPTX005");
        assert!(!err.is_integrity_violation());
    }
}
