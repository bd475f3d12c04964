//! Error types for exports.

use infodeck_pptx::PptxError;
use infodeck_render::RenderError;
use infodeck_svg::SvgError;
use thiserror::Error;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur during an export
#[derive(Error, Debug)]
pub enum ExportError {
    /// Input SVG could not be parsed, even after the namespace retry
    #[error("Malformed SVG document: {0}")]
    MalformedDocument(String),

    /// Requested format is not one of svg, png, pdf, pptx
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The backend for this format was not compiled in
    #[error("Missing optional dependency: {0}")]
    MissingOptionalDependency(String),

    /// The patched package broke a cross-part invariant
    #[error("Package integrity violation: {0}")]
    PackageIntegrityViolation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Renderer or packaging failure
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Export identifier is not a plain file name
    #[error("Invalid export identifier: {0}")]
    InvalidIdentifier(String),
}

impl ExportError {
    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedDocument(_) => "EXP001",
            Self::UnsupportedFormat(_) => "EXP002",
            Self::MissingOptionalDependency(_) => "EXP003",
            Self::PackageIntegrityViolation(_) => "EXP004",
            Self::Io(_) => "EXP005",
            Self::Render(_) => "EXP006",
            Self::Config(_) => "EXP007",
            Self::InvalidIdentifier(_) => "EXP008",
        }
    }
}

impl From<SvgError> for ExportError {
    fn from(err: SvgError) -> Self {
        match err {
            SvgError::Io(e) => Self::Io(e),
            other => Self::MalformedDocument(other.to_string()),
        }
    }
}

impl From<PptxError> for ExportError {
    fn from(err: PptxError) -> Self {
        if err.is_integrity_violation() {
            return Self::PackageIntegrityViolation(err.to_string());
        }
        match err {
            PptxError::IoError(e) => Self::Io(e),
            other => Self::Render(format!("[{}] {}", other.code(), other)),
        }
    }
}

impl From<RenderError> for ExportError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::FeatureDisabled { .. } => Self::MissingOptionalDependency(err.to_string()),
            RenderError::InvalidSvg(reason) => Self::MalformedDocument(reason),
            other => Self::Render(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for ExportError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
