//! Export configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! [output]
//! dir = "temp/exports"
//! stem = "infographic"
//!
//! [slide]
//! width_in = 10.0
//! height_in = 5.625
//! margin_in = 0.25
//! template = "corporate.potx"
//!
//! [raster]
//! width = 800
//! height = 600
//! scale = 2.0
//! background = "white"
//! ```

use std::path::{Path, PathBuf};

use infodeck_pptx::SlideGeometry;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Top-level export configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Managed output directory and naming
    pub output: OutputConfig,
    /// PPTX slide layout
    pub slide: SlideConfig,
    /// PNG rendering defaults
    pub raster: RasterConfig,
}

impl ExportConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Same configuration with another output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }
}

/// Where exports are written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Managed output directory, created on first export
    pub dir: PathBuf,
    /// File stem of generated names (`<stem>-<uuid>.<ext>`)
    pub stem: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("temp/exports"),
            stem: "infographic".to_string(),
        }
    }
}

/// Slide layout for PPTX exports, in inches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlideConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub margin_in: f64,
    /// Pixel density of the source canvas
    pub dpi: f64,
    /// Height reserved for the optional title
    pub title_band_in: f64,
    /// Template to patch instead of the built-in blank deck; its own slide
    /// size replaces `width_in`/`height_in`
    pub template: Option<PathBuf>,
    /// Add a PNG rendering as the primary picture, with the SVG as extension
    pub png_fallback: bool,
}

impl Default for SlideConfig {
    fn default() -> Self {
        let geometry = SlideGeometry::default();
        Self {
            width_in: geometry.width_in,
            height_in: geometry.height_in,
            margin_in: geometry.margin_in,
            dpi: geometry.dpi,
            title_band_in: geometry.title_band_in,
            template: None,
            png_fallback: true,
        }
    }
}

impl SlideConfig {
    /// Geometry for a slide of `width_in x height_in`
    pub fn geometry(&self) -> SlideGeometry {
        SlideGeometry {
            width_in: self.width_in,
            height_in: self.height_in,
            margin_in: self.margin_in,
            dpi: self.dpi,
            title_band_in: self.title_band_in,
        }
    }

    /// Geometry for a template slide of the given EMU size
    pub fn geometry_for_emu(&self, width_emu: i64, height_emu: i64) -> SlideGeometry {
        SlideGeometry::from_emu(width_emu, height_emu)
            .with_margin(self.margin_in)
            .with_dpi(self.dpi)
            .with_title_band(self.title_band_in)
    }
}

/// PNG rendering defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RasterConfig {
    /// Bounding box width in pixels
    pub width: u32,
    /// Bounding box height in pixels
    pub height: u32,
    /// Multiplier applied after fitting
    pub scale: f32,
    /// Background fill (CSS color); transparent when unset
    pub background: Option<String>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scale: 2.0,
            background: None,
        }
    }
}
