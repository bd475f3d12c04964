//! # infodeck-svg
//!
//! SVG handling for infodeck:
//! - an arena-backed document tree with namespace-aware parsing
//! - inline style resolution and font substitution
//! - `foreignObject` to `<text>` normalization
//! - canvas size inference and a presentation compatibility report
//!
//! ## Example
//!
//! ```
//! use infodeck_svg::{canvas_size, normalize, parse_lenient, to_string};
//!
//! let mut doc = parse_lenient(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 720 243"/>"#)?;
//! let report = normalize(&mut doc);
//! assert_eq!(report.replaced, 0);
//! assert_eq!(canvas_size(&doc).width, 720.0);
//! let _markup = to_string(&doc)?;
//! # Ok::<(), infodeck_svg::SvgError>(())
//! ```

pub mod canvas;
pub mod check;
pub mod error;
pub mod fonts;
pub mod normalize;
pub mod parse;
pub mod serialize;
pub mod style;
pub mod tree;

pub use canvas::{canvas_size, CanvasSize};
pub use check::{compatibility_report, CompatibilityReport, TextSample, TextSource};
pub use error::{Result, SvgError};
pub use fonts::{map_font, SANS_FAMILY, SERIF_FAMILY};
pub use normalize::{
    normalize, normalize_svg, DominantBaseline, NormalizeReport, PlacementRect,
    ResolvedTextStyle, TextAnchor,
};
pub use parse::{parse_document, parse_lenient, SVG_NS};
pub use serialize::to_string;
pub use style::{color_to_hex, extract_number, StyleMap};
pub use tree::{Attribute, Document, Element, NodeData, NodeId};
