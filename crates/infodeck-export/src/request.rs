//! Per-request options and results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::format::ExportFormat;

/// Options for one export; unset fields fall back to the configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Output file name inside the managed directory; generated when unset
    pub filename: Option<String>,
    /// Slide title (PPTX only)
    pub title: Option<String>,
    /// Raster bounding box width in pixels (PNG only)
    pub width: Option<u32>,
    /// Raster bounding box height in pixels (PNG only)
    pub height: Option<u32>,
    /// Raster scale factor (PNG only)
    pub scale: Option<f32>,
    /// Rewrite `foreignObject` text into `<text>` (SVG only; always on for
    /// the other formats)
    pub normalize_text: bool,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_normalize_text(mut self, normalize_text: bool) -> Self {
        self.normalize_text = normalize_text;
        self
    }

    /// Title with surrounding whitespace removed; `None` when blank
    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Outcome of a successful export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResult {
    pub format: ExportFormat,
    /// File name inside the output directory; the handle for `resolve`,
    /// `encode_base64` and `cleanup`
    pub identifier: String,
    pub storage_path: PathBuf,
    pub size_bytes: u64,
    /// Pixel width (PNG), page width in points (PDF) or source canvas width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ExportResult {
    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = ExportOptions::new()
            .with_filename("q1.pptx")
            .with_title("Q1")
            .with_size(1024, 768)
            .with_scale(1.5)
            .with_normalize_text(true);
        assert_eq!(options.filename.as_deref(), Some("q1.pptx"));
        assert_eq!(options.width, Some(1024));
        assert_eq!(options.height, Some(768));
        assert_eq!(options.scale, Some(1.5));
        assert!(options.normalize_text);
    }

    #[test]
    fn test_blank_title_is_none() {
        assert_eq!(ExportOptions::new().with_title("   ").title(), None);
        assert_eq!(ExportOptions::new().with_title(" Q1 ").title(), Some("Q1"));
    }

    #[test]
    fn test_result_json_omits_missing_size() {
        let result = ExportResult {
            format: ExportFormat::Svg,
            identifier: "a.svg".into(),
            storage_path: PathBuf::from("out/a.svg"),
            size_bytes: 10,
            width: None,
            height: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["format"], "svg");
        assert!(json.get("width").is_none());
    }
}
