//! Canvas size inference.

use serde::Serialize;

use crate::tree::Document;

/// Width used when nothing on the root declares a size
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Height used when nothing on the root declares a size
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Source canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// Size of the root canvas: `viewBox` first, then `width`/`height`, then
/// 800x600.
pub fn canvas_size(doc: &Document) -> CanvasSize {
    let Some(root) = doc.root_element().and_then(|id| doc.element(id)) else {
        return CanvasSize::default();
    };

    if let Some((width, height)) = root.attr("viewBox").and_then(parse_view_box) {
        return CanvasSize { width, height };
    }

    match (
        root.attr("width").and_then(parse_length),
        root.attr("height").and_then(parse_length),
    ) {
        (Some(width), Some(height)) => CanvasSize { width, height },
        _ => CanvasSize::default(),
    }
}

fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [_, _, w, h] if *w > 0.0 && *h > 0.0 => Some((*w, *h)),
        _ => None,
    }
}

/// Absolute pixel length; percentages and unknown units are rejected.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}
