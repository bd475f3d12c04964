//! SVG → PNG rasterization
//!
//! Requires the `raster` feature (enabled by default):
//! ```toml
//! infodeck-render = { version = "0.3", features = ["raster"] }
//! ```

#[cfg(feature = "raster")]
use std::sync::Arc;

use crate::renderer::{RenderError, RenderOptions, RenderResult, RenderedImage, SvgRenderer};

/// PNG renderer backed by resvg
///
/// # Example
///
/// ```ignore
/// use infodeck_render::{PngRenderer, RenderOptions, SvgRenderer};
///
/// let renderer = PngRenderer::new();
/// let png = renderer.render(svg, &RenderOptions::new().with_width(800))?;
/// ```
#[derive(Clone)]
pub struct PngRenderer {
    #[cfg(feature = "raster")]
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PngRenderer {
    /// Create a renderer with system fonts loaded
    #[cfg(feature = "raster")]
    pub fn new() -> Self {
        Self {
            fontdb: crate::source::system_fonts(),
        }
    }

    #[cfg(not(feature = "raster"))]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(feature = "raster")]
    fn svg_to_png(&self, svg: &str, options: &RenderOptions) -> RenderResult<RenderedImage> {
        let tree = crate::source::parse_tree(svg, &self.fontdb)?;
        let size = tree.size();
        let (width, height, scale) = calculate_dimensions(size.width(), size.height(), options)?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(
            RenderError::InvalidDimensions {
                width: width as f32,
                height: height as f32,
            },
        )?;

        if let Some(ref bg) = options.background {
            match parse_color(bg) {
                Some(color) => pixmap.fill(color),
                None => tracing::warn!(background = %bg, "Ignoring unrecognized background color"),
            }
        }

        let transform = tiny_skia::Transform::from_scale(scale, scale);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let data = pixmap
            .encode_png()
            .map_err(|e| RenderError::RenderFailed(format!("PNG encoding failed: {}", e)))?;

        tracing::debug!(width, height, scale, bytes = data.len(), "Rasterized SVG");
        Ok(RenderedImage {
            data,
            width,
            height,
        })
    }
}

impl SvgRenderer for PngRenderer {
    fn name(&self) -> &'static str {
        "resvg"
    }

    fn media_type(&self) -> &'static str {
        "image/png"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "raster")
    }

    #[cfg(feature = "raster")]
    fn render(&self, svg: &str, options: &RenderOptions) -> RenderResult<RenderedImage> {
        self.svg_to_png(svg, options)
    }

    #[cfg(not(feature = "raster"))]
    fn render(&self, _svg: &str, _options: &RenderOptions) -> RenderResult<RenderedImage> {
        Err(RenderError::FeatureDisabled {
            format: "PNG",
            feature: "raster",
        })
    }
}

/// Target pixel size and scale factor
///
/// With both bounds the image is fitted inside them; with one bound it is
/// scaled proportionally. `options.scale` multiplies the result. A zero
/// bound leaves nothing to draw and is rejected.
#[cfg_attr(not(feature = "raster"), allow(dead_code))]
pub(crate) fn calculate_dimensions(
    original_width: f32,
    original_height: f32,
    options: &RenderOptions,
) -> RenderResult<(u32, u32, f32)> {
    let base_scale = options.scale.filter(|s| s.is_finite() && *s > 0.0).unwrap_or(1.0);

    let scale = match (options.width, options.height) {
        (Some(w), Some(h)) => {
            let scale_x = w as f32 / original_width;
            let scale_y = h as f32 / original_height;
            scale_x.min(scale_y) * base_scale
        }
        (Some(w), None) => (w as f32 / original_width) * base_scale,
        (None, Some(h)) => (h as f32 / original_height) * base_scale,
        (None, None) => base_scale,
    };

    if !scale.is_finite() || scale <= 0.0 {
        return Err(RenderError::InvalidDimensions {
            width: options.width.map_or(original_width, |w| w as f32),
            height: options.height.map_or(original_height, |h| h as f32),
        });
    }

    Ok((ceil_px(original_width * scale), ceil_px(original_height * scale), scale))
}

/// Round up to whole pixels, absorbing f32 noise (`800.00006` is 800)
#[cfg_attr(not(feature = "raster"), allow(dead_code))]
fn ceil_px(value: f32) -> u32 {
    ((value - 1e-3).ceil() as u32).max(1)
}

/// Parse a CSS color string to tiny_skia::Color
#[cfg(feature = "raster")]
fn parse_color(color: &str) -> Option<tiny_skia::Color> {
    // rgb()/rgba() become hex first
    let color = infodeck_svg::color_to_hex(color.trim()).to_lowercase();

    match color.as_str() {
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        "transparent" | "none" => return Some(tiny_skia::Color::TRANSPARENT),
        "red" => return Some(tiny_skia::Color::from_rgba8(255, 0, 0, 255)),
        "green" => return Some(tiny_skia::Color::from_rgba8(0, 128, 0, 255)),
        "blue" => return Some(tiny_skia::Color::from_rgba8(0, 0, 255, 255)),
        _ => {}
    }

    let hex = color.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            // #RGB -> #RRGGBB
            let r = channel(&hex[0..1].repeat(2))?;
            let g = channel(&hex[1..2].repeat(2))?;
            let b = channel(&hex[2..3].repeat(2))?;
            Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
        }
        6 | 8 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            let a = if hex.len() == 8 { channel(&hex[6..8])? } else { 255 };
            Some(tiny_skia::Color::from_rgba8(r, g, b, a))
        }
        _ => None,
    }
}
