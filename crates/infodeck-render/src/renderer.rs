//! Renderer trait, options and error types

/// Errors that can occur while rendering SVG
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The output format was compiled out
    #[error("{format} output requires the `{feature}` feature of infodeck-render")]
    FeatureDisabled {
        format: &'static str,
        feature: &'static str,
    },

    /// The SVG could not be parsed by the renderer
    #[error("Invalid SVG: {0}")]
    InvalidSvg(String),

    /// The SVG or the requested output has no area
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    /// Rendering or encoding failed
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Options for rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Target width in pixels (the image is fitted, keeping its aspect ratio)
    pub width: Option<u32>,
    /// Target height in pixels (the image is fitted, keeping its aspect ratio)
    pub height: Option<u32>,
    /// Background color (CSS color string, e.g., "white", "#ffffff", "rgb(1,2,3)")
    pub background: Option<String>,
    /// Scale factor applied after fitting (2.0 = retina)
    pub scale: Option<f32>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set target height
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set background color
    pub fn with_background(mut self, bg: impl Into<String>) -> Self {
        self.background = Some(bg.into());
        self
    }

    /// Set scale factor
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// Rendered output with its size
///
/// Sizes are pixels for raster output and points for PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// An SVG-to-bytes backend
///
/// Backends whose cargo feature is disabled still exist; they report
/// `is_available() == false` and fail with [`RenderError::FeatureDisabled`].
pub trait SvgRenderer: Send + Sync {
    /// Human-readable name of this renderer
    fn name(&self) -> &'static str;

    /// Media type of the produced bytes
    fn media_type(&self) -> &'static str;

    /// Whether the backend was compiled in
    fn is_available(&self) -> bool;

    /// Render `svg` markup
    fn render(&self, svg: &str, options: &RenderOptions) -> RenderResult<RenderedImage>;
}
