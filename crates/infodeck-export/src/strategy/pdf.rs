//! SVG → PDF

use std::path::Path;

use infodeck_render::{PdfRenderer, RenderOptions, SvgRenderer};
use infodeck_svg::to_string;

use super::{normalized, write_atomic, ExportStrategy, Written};
use crate::error::Result;
use crate::format::ExportFormat;
use crate::request::ExportOptions;

/// Converts the normalized SVG to a one-page vector PDF
#[derive(Clone, Default)]
pub struct PdfStrategy {
    renderer: PdfRenderer,
}

impl PdfStrategy {
    pub fn new(renderer: PdfRenderer) -> Self {
        Self { renderer }
    }
}

impl ExportStrategy for PdfStrategy {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn is_available(&self) -> bool {
        self.renderer.is_available()
    }

    fn export(&self, svg: &str, _options: &ExportOptions, output: &Path) -> Result<Written> {
        let (doc, _) = normalized(svg)?;
        let markup = to_string(&doc)?;
        let image = self.renderer.render(&markup, &RenderOptions::default())?;
        write_atomic(output, &image.data)?;
        Ok(Written::sized(image.width, image.height))
    }
}
