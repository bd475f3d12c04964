//! One strategy per export format.
//!
//! Strategies write their output to the path they are given and report the
//! size of what they produced. Only [`PptxStrategy`] runs the full
//! transcoding pipeline; the others are thin library calls.

mod pdf;
mod png;
mod pptx;
mod svg;

use std::io::Write;
use std::path::Path;

use infodeck_svg::{normalize, parse_lenient, Document, NormalizeReport};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;
use crate::format::ExportFormat;
use crate::request::ExportOptions;

pub use pdf::PdfStrategy;
pub use png::PngStrategy;
pub use pptx::PptxStrategy;
pub use svg::SvgStrategy;

/// Size reported by a strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Written {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Written {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// An export format implementation
pub trait ExportStrategy: Send + Sync {
    fn format(&self) -> ExportFormat;

    /// Whether the backend this strategy needs was compiled in
    fn is_available(&self) -> bool {
        true
    }

    /// Write `svg` in this format to `output`
    ///
    /// On error nothing is left at `output`.
    fn export(&self, svg: &str, options: &ExportOptions, output: &Path) -> Result<Written>;
}

/// Parse leniently and rewrite `foreignObject` text into `<text>`
pub(crate) fn normalized(svg: &str) -> Result<(Document, NormalizeReport)> {
    let mut doc = parse_lenient(svg)?;
    let report = normalize(&mut doc);
    debug!(%report, "Normalized foreignObject text");
    Ok((doc, report))
}

/// Write `bytes` through a temporary file in the same directory
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Round a pixel size to a positive integer
pub(crate) fn whole_pixels(value: f64) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        1
    }
}
