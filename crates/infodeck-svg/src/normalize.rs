//! HTML-in-SVG text normalization.
//!
//! Rewrites each `<foreignObject>` that wraps a text `<span>` into a native
//! `<text>` element positioned from the container's layout box. Presentation
//! software and most rasterizers ignore `foreignObject`, so after this pass the
//! text survives conversion.
//!
//! ```
//! use infodeck_svg::normalize_svg;
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><foreignObject x="10" y="5" width="100" height="20"><span xmlns="http://www.w3.org/1999/xhtml" style="color: rgb(38,38,38); text-align: center">Hi</span></foreignObject></svg>"#;
//! let out = normalize_svg(svg)?;
//! assert!(out.contains(r##"<text x="60" y="5" fill="#262626""##));
//! # Ok::<(), infodeck_svg::SvgError>(())
//! ```

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::fonts::{map_font, SANS_FAMILY};
use crate::parse::parse_lenient;
use crate::serialize::to_string;
use crate::style::StyleMap;
use crate::tree::{Document, Element, NodeData, NodeId};

/// Layout box of a container, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PlacementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacementRect {
    /// Read `x`, `y`, `width`, `height`; missing or unparsable values are 0.
    pub fn from_element(element: &Element) -> Self {
        let num = |name: &str| {
            element
                .attr(name)
                .and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
        };
        Self {
            x: num("x"),
            y: num("y"),
            width: num("width"),
            height: num("height"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }

    fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword.map(str::trim) {
            Some("center") => Self::Middle,
            Some("right" | "end" | "flex-end") => Self::End,
            _ => Self::Start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DominantBaseline {
    BeforeEdge,
    Middle,
    AfterEdge,
}

impl DominantBaseline {
    /// SVG attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeEdge => "text-before-edge",
            Self::Middle => "middle",
            Self::AfterEdge => "text-after-edge",
        }
    }

    fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword.map(str::trim) {
            Some("center") => Self::Middle,
            Some("flex-end" | "end") => Self::AfterEdge,
            _ => Self::BeforeEdge,
        }
    }
}

/// Effective text style of one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTextStyle {
    pub font_size_px: f64,
    pub fill: String,
    pub bold: bool,
    pub font_family: &'static str,
    pub text_anchor: TextAnchor,
    pub dominant_baseline: DominantBaseline,
}

impl ResolvedTextStyle {
    pub fn from_style_map(map: &StyleMap) -> Self {
        Self {
            font_size_px: map.font_size(),
            fill: map.fill(),
            bold: map.is_bold(),
            font_family: map.get("font-family").map(map_font).unwrap_or(SANS_FAMILY),
            text_anchor: TextAnchor::from_keyword(map.horizontal_alignment()),
            dominant_baseline: DominantBaseline::from_keyword(map.vertical_alignment()),
        }
    }

    /// Anchor point inside `rect` for this alignment.
    pub fn anchor_point(&self, rect: &PlacementRect) -> (f64, f64) {
        let x = match self.text_anchor {
            TextAnchor::Start => rect.x,
            TextAnchor::Middle => rect.x + rect.width / 2.0,
            TextAnchor::End => rect.x + rect.width,
        };
        let y = match self.dominant_baseline {
            DominantBaseline::BeforeEdge => rect.y,
            DominantBaseline::Middle => rect.y + rect.height / 2.0,
            DominantBaseline::AfterEdge => rect.y + rect.height,
        };
        (x, y)
    }
}

/// Outcome of a normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// Containers rewritten into `<text>`
    pub replaced: usize,
    /// Containers left alone (no span, or only whitespace)
    pub skipped: usize,
}

impl fmt::Display for NormalizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} replaced, {} skipped", self.replaced, self.skipped)
    }
}

/// Rewrite every eligible `foreignObject` in place.
pub fn normalize(doc: &mut Document) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for container in doc.find_by_local_name("foreignObject") {
        // Nested in a container replaced earlier in this pass
        if !doc.is_attached(container) {
            continue;
        }
        match build_text_element(doc, container) {
            Some((element, text)) => {
                debug!(node = container.0, text = %text, "replacing foreignObject");
                doc.replace(container, NodeData::Element(element));
                doc.append(container, NodeData::Text(text));
                report.replaced += 1;
            }
            None => {
                debug!(node = container.0, "foreignObject has no text span, skipped");
                report.skipped += 1;
            }
        }
    }

    report
}

/// Parse, normalize and serialize markup.
pub fn normalize_svg(input: &str) -> Result<String> {
    let mut doc = parse_lenient(input)?;
    normalize(&mut doc);
    to_string(&doc)
}

fn build_text_element(doc: &Document, container: NodeId) -> Option<(Element, String)> {
    let container_el = doc.element(container)?;
    let span = doc.first_child_element(container, "span")?;
    let text = doc.text_content(span).trim().to_string();
    if text.is_empty() {
        return None;
    }

    let rect = PlacementRect::from_element(container_el);
    let style_attr = doc.element(span).and_then(|s| s.attr("style")).unwrap_or("");
    let style = ResolvedTextStyle::from_style_map(&StyleMap::resolve(style_attr));
    let (x, y) = style.anchor_point(&rect);

    let name = match container_el.prefix() {
        Some(prefix) => format!("{}:text", prefix),
        None => "text".to_string(),
    };

    let mut element = Element::new(name)
        .with_attr("x", format_number(x))
        .with_attr("y", format_number(y))
        .with_attr("fill", style.fill.clone())
        .with_attr("font-size", format_number(style.font_size_px))
        .with_attr("font-family", style.font_family);
    if style.bold {
        element.set_attr("font-weight", "bold");
    }
    element.set_attr("text-anchor", style.text_anchor.as_str());
    element.set_attr("dominant-baseline", style.dominant_baseline.as_str());

    Some((element, text))
}

/// Shortest decimal form: `28`, `16.5`, `0.125`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
