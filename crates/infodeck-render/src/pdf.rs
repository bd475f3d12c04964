//! SVG → PDF conversion, vector output via svg2pdf
//!
//! Requires the `pdf` feature (off by default).

#[cfg(feature = "pdf")]
use std::sync::Arc;

use crate::renderer::{RenderOptions, RenderResult, RenderedImage, SvgRenderer};

/// Single-page PDF renderer
///
/// The page takes the SVG's own size; width, height and scale options are
/// raster concerns and are ignored.
#[derive(Clone)]
pub struct PdfRenderer {
    #[cfg(feature = "pdf")]
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRenderer {
    #[cfg(feature = "pdf")]
    pub fn new() -> Self {
        Self {
            fontdb: crate::source::system_fonts(),
        }
    }

    #[cfg(not(feature = "pdf"))]
    pub fn new() -> Self {
        Self {}
    }
}

impl SvgRenderer for PdfRenderer {
    fn name(&self) -> &'static str {
        "svg2pdf"
    }

    fn media_type(&self) -> &'static str {
        "application/pdf"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "pdf")
    }

    #[cfg(feature = "pdf")]
    fn render(&self, svg: &str, _options: &RenderOptions) -> RenderResult<RenderedImage> {
        use crate::renderer::RenderError;

        let tree = crate::source::parse_tree(svg, &self.fontdb)?;
        let size = tree.size();

        let data = svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|e| RenderError::RenderFailed(format!("PDF conversion failed: {:?}", e)))?;

        tracing::debug!(
            width = size.width(),
            height = size.height(),
            bytes = data.len(),
            "Converted SVG to PDF"
        );
        Ok(RenderedImage {
            data,
            width: size.width().ceil() as u32,
            height: size.height().ceil() as u32,
        })
    }

    #[cfg(not(feature = "pdf"))]
    fn render(&self, _svg: &str, _options: &RenderOptions) -> RenderResult<RenderedImage> {
        Err(crate::renderer::RenderError::FeatureDisabled {
            format: "PDF",
            feature: "pdf",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "pdf")]
    #[test]
    fn test_convert_simple_svg() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="80">
            <rect x="10" y="10" width="80" height="60" fill="blue"/>
        </svg>"#;
        let image = PdfRenderer::new().render(svg, &RenderOptions::default()).unwrap();
        assert!(image.data.starts_with(b"%PDF"));
        assert_eq!((image.width, image.height), (100, 80));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_invalid_svg() {
        assert!(PdfRenderer::new()
            .render("not an svg", &RenderOptions::default())
            .is_err());
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn test_disabled_backend() {
        let renderer = PdfRenderer::new();
        assert!(!renderer.is_available());
        let err = renderer.render("<svg/>", &RenderOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::RenderError::FeatureDisabled { feature: "pdf", .. }
        ));
    }
}
