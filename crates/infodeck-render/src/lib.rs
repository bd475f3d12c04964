//! # infodeck-render
//!
//! Thin rendering backends for the single-file export formats.
//!
//! ## Backends
//!
//! | Backend | Output | Feature | Library |
//! |---------|--------|---------|---------|
//! | [`PngRenderer`] | PNG | `raster` (default) | resvg + tiny-skia |
//! | [`PdfRenderer`] | PDF | `pdf` | svg2pdf |
//!
//! Both types exist in every build. A backend whose feature is disabled
//! reports `is_available() == false` and fails with
//! [`RenderError::FeatureDisabled`], so callers can surface a clear error
//! instead of a missing symbol.
//!
//! ## Example
//!
//! ```ignore
//! use infodeck_render::{PngRenderer, RenderOptions, SvgRenderer};
//!
//! let image = PngRenderer::new().render(svg, &RenderOptions::new().with_scale(2.0))?;
//! std::fs::write("chart.png", image.data)?;
//! ```

pub mod pdf;
pub mod raster;
pub mod renderer;

#[cfg(any(feature = "raster", feature = "pdf"))]
mod source;

pub use pdf::PdfRenderer;
pub use raster::PngRenderer;
pub use renderer::{RenderError, RenderOptions, RenderResult, RenderedImage, SvgRenderer};

/// Whether PNG output was compiled in
pub const RASTER_ENABLED: bool = cfg!(feature = "raster");

/// Whether PDF output was compiled in
pub const PDF_ENABLED: bool = cfg!(feature = "pdf");
