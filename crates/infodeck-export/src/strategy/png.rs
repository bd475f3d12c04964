//! SVG → PNG

use std::path::Path;

use infodeck_render::{PngRenderer, RenderOptions, SvgRenderer};
use infodeck_svg::to_string;

use super::{normalized, write_atomic, ExportStrategy, Written};
use crate::config::RasterConfig;
use crate::error::Result;
use crate::format::ExportFormat;
use crate::request::ExportOptions;

/// Rasterizes the normalized SVG with resvg
#[derive(Clone)]
pub struct PngStrategy {
    renderer: PngRenderer,
    raster: RasterConfig,
}

impl PngStrategy {
    pub fn new(renderer: PngRenderer, raster: RasterConfig) -> Self {
        Self { renderer, raster }
    }

    fn render_options(&self, options: &ExportOptions) -> RenderOptions {
        let mut render = RenderOptions::new()
            .with_width(options.width.unwrap_or(self.raster.width))
            .with_height(options.height.unwrap_or(self.raster.height))
            .with_scale(options.scale.unwrap_or(self.raster.scale));
        if let Some(ref background) = self.raster.background {
            render = render.with_background(background.clone());
        }
        render
    }
}

impl ExportStrategy for PngStrategy {
    fn format(&self) -> ExportFormat {
        ExportFormat::Png
    }

    fn is_available(&self) -> bool {
        self.renderer.is_available()
    }

    fn export(&self, svg: &str, options: &ExportOptions, output: &Path) -> Result<Written> {
        let (doc, _) = normalized(svg)?;
        let markup = to_string(&doc)?;
        let image = self.renderer.render(&markup, &self.render_options(options))?;
        write_atomic(output, &image.data)?;
        Ok(Written::sized(image.width, image.height))
    }
}
