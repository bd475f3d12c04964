//! SVG write-out

use std::path::Path;

use infodeck_svg::{canvas_size, to_string};

use super::{normalized, whole_pixels, write_atomic, ExportStrategy, Written};
use crate::error::Result;
use crate::format::ExportFormat;
use crate::request::ExportOptions;

/// Writes the SVG as received, or normalized when `normalize_text` is set
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgStrategy;

impl ExportStrategy for SvgStrategy {
    fn format(&self) -> ExportFormat {
        ExportFormat::Svg
    }

    fn export(&self, svg: &str, options: &ExportOptions, output: &Path) -> Result<Written> {
        if !options.normalize_text {
            write_atomic(output, svg.as_bytes())?;
            return Ok(Written::default());
        }

        let (doc, _) = normalized(svg)?;
        let canvas = canvas_size(&doc);
        let markup = to_string(&doc)?;
        write_atomic(output, markup.as_bytes())?;
        Ok(Written::sized(
            whole_pixels(canvas.width),
            whole_pixels(canvas.height),
        ))
    }
}
