//! SVG → editable PPTX
//!
//! The full transcoding pipeline:
//!
//! ```text
//! parse (lenient) → normalize text → canvas size
//!   → template (configured file or blank deck) → fit and center
//!   → [title box] → picture (SVG, optional PNG fallback) → validate → atomic write
//! ```

use std::path::Path;

use infodeck_ooxml::{emu_to_pixels, inches_to_emu};
use infodeck_pptx::{load_template, slide_size, Asset, BlankDeck, ContainerPatcher, TitleBox};
use infodeck_render::{PngRenderer, RenderOptions, SvgRenderer};
use infodeck_svg::{canvas_size, to_string};
use tracing::{info, warn};

use super::{normalized, whole_pixels, ExportStrategy, Written};
use crate::config::SlideConfig;
use crate::error::Result;
use crate::format::ExportFormat;
use crate::request::ExportOptions;

/// Name of the picture shape on the slide
const PICTURE_NAME: &str = "Infographic";

/// Oversampling of the PNG fallback relative to its on-slide size
const FALLBACK_SCALE: f32 = 2.0;

/// Patches a template slide with the normalized SVG
#[derive(Clone)]
pub struct PptxStrategy {
    slide: SlideConfig,
    fallback_renderer: PngRenderer,
}

impl PptxStrategy {
    pub fn new(slide: SlideConfig, fallback_renderer: PngRenderer) -> Self {
        Self {
            slide,
            fallback_renderer,
        }
    }

    fn open_template(&self, title: Option<&str>) -> Result<ContainerPatcher> {
        let package = match self.slide.template.as_deref() {
            Some(path) => load_template(Some(path))?,
            None => {
                let mut deck = BlankDeck::new().with_slide_size(
                    inches_to_emu(self.slide.width_in),
                    inches_to_emu(self.slide.height_in),
                );
                if let Some(title) = title {
                    deck = deck.with_title(title);
                }
                deck.build()
            }
        };
        Ok(ContainerPatcher::new(package)?)
    }

    /// PNG of the normalized SVG at twice its on-slide pixel size
    ///
    /// A failed rendering only costs the fallback, never the export.
    fn render_fallback(&self, markup: &str, width_emu: i64, height_emu: i64) -> Option<Vec<u8>> {
        if !self.slide.png_fallback || !self.fallback_renderer.is_available() {
            return None;
        }
        let options = RenderOptions::new()
            .with_width(whole_pixels(emu_to_pixels(width_emu)))
            .with_height(whole_pixels(emu_to_pixels(height_emu)))
            .with_scale(FALLBACK_SCALE);
        match self.fallback_renderer.render(markup, &options) {
            Ok(image) => Some(image.data),
            Err(e) => {
                warn!(error = %e, "PNG fallback rendering failed, embedding SVG only");
                None
            }
        }
    }
}

impl ExportStrategy for PptxStrategy {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pptx
    }

    fn export(&self, svg: &str, options: &ExportOptions, output: &Path) -> Result<Written> {
        let (doc, report) = normalized(svg)?;
        let canvas = canvas_size(&doc);
        let markup = to_string(&doc)?;
        let title = options.title();

        let mut patcher = self.open_template(title)?;
        let (cx, cy) = slide_size(patcher.package())?;
        let geometry = self.slide.geometry_for_emu(cx, cy);
        let placement = geometry.place(canvas.width, canvas.height, title.is_some());

        if let Some(title) = title {
            patcher.add_title(&TitleBox::new(title, geometry.title_rect()))?;
        }

        let fallback = self.render_fallback(&markup, placement.rect.cx, placement.rect.cy);
        let fallback_asset = fallback.as_deref().map(Asset::png);
        let embedded = patcher.embed(
            &Asset::svg(markup.as_bytes()),
            fallback_asset.as_ref(),
            placement.rect,
            PICTURE_NAME,
        )?;
        patcher.write_atomic(output)?;

        info!(
            output = %output.display(),
            slide = %embedded.slide,
            media = %embedded.media_part,
            texts = report.replaced,
            scale = placement.fit.scale,
            "PPTX export complete"
        );
        Ok(Written::sized(
            whole_pixels(canvas.width),
            whole_pixels(canvas.height),
        ))
    }
}
