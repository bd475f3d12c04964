//! Export formats

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// SVG as received, optionally with text normalized
    Svg,
    /// Rasterized PNG
    Png,
    /// Vector PDF
    Pdf,
    /// Editable PowerPoint deck
    Pptx,
}

impl ExportFormat {
    /// All formats, in listing order
    pub fn all() -> &'static [ExportFormat] {
        &[Self::Svg, Self::Png, Self::Pdf, Self::Pptx]
    }

    /// Short identifier, as accepted by `FromStr`
    pub fn id(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Pptx => "pptx",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Svg => "SVG",
            Self::Png => "PNG",
            Self::Pdf => "PDF",
            Self::Pptx => "PowerPoint",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Svg => "Scalable vector graphic, editable in design tools",
            Self::Png => "High-resolution raster image",
            Self::Pdf => "Vector document for printing and sharing",
            Self::Pptx => "Editable slide with native text, for PowerPoint and WPS",
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        self.id()
    }

    /// Get the MIME type for this format
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    /// Format owning a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.extension().eq_ignore_ascii_case(ext.trim_start_matches('.')))
    }

    pub fn descriptor(&self) -> FormatDescriptor {
        FormatDescriptor {
            id: self.id(),
            label: self.label(),
            description: self.description(),
            extension: self.extension(),
            media_type: self.media_type(),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            "pptx" | "ppt" | "powerpoint" => Ok(Self::Pptx),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Listing entry for a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub extension: &'static str,
    pub media_type: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("svg".parse::<ExportFormat>().unwrap(), ExportFormat::Svg);
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!(" pptx ".parse::<ExportFormat>().unwrap(), ExportFormat::Pptx);
        let err = "gif".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ref f) if f == "gif"));
    }

    #[test]
    fn test_properties() {
        assert_eq!(ExportFormat::Pptx.extension(), "pptx");
        assert_eq!(ExportFormat::Svg.media_type(), "image/svg+xml");
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
        assert_eq!(ExportFormat::all().len(), 4);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ExportFormat::from_extension(".PPTX"), Some(ExportFormat::Pptx));
        assert_eq!(ExportFormat::from_extension("gif"), None);
    }

    #[test]
    fn test_descriptor_serializes() {
        let json = serde_json::to_value(ExportFormat::Png.descriptor()).unwrap();
        assert_eq!(json["id"], "png");
        assert_eq!(json["media_type"], "image/png");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ExportFormat::Pptx).unwrap(), "\"pptx\"");
    }
}
