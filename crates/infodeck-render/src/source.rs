//! SVG parsing shared by the raster and PDF backends.

use std::sync::Arc;

use tracing::{debug, warn};
use usvg::fontdb::Database;

use crate::renderer::{RenderError, RenderResult};

/// System font database
///
/// Text in normalized SVGs names CJK families; without system fonts it is
/// dropped by the renderers.
pub(crate) fn system_fonts() -> Arc<Database> {
    let mut fontdb = Database::new();
    fontdb.load_system_fonts();

    if fontdb.is_empty() {
        warn!("No system fonts found, text rendering may be limited");
    } else {
        debug!(faces = fontdb.len(), "Loaded system fonts");
    }

    Arc::new(fontdb)
}

/// Parse `svg` into a usvg tree with a non-empty size
pub(crate) fn parse_tree(svg: &str, fontdb: &Arc<Database>) -> RenderResult<usvg::Tree> {
    let mut opts = usvg::Options::default();
    opts.fontdb = Arc::clone(fontdb);

    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| RenderError::InvalidSvg(format!("SVG parsing failed: {}", e)))?;

    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(RenderError::InvalidDimensions {
            width: size.width(),
            height: size.height(),
        });
    }
    Ok(tree)
}
