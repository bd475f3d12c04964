//! # infodeck-pptx
//!
//! Presentation packaging for infodeck exports.
//!
//! This crate turns a normalized SVG into a one-slide PowerPoint deck by
//! patching a template package rather than generating one from scratch.
//!
//! ## Features
//!
//! - **Blank Deck**: Minimal 16:9 one-slide package when no template is given
//! - **Geometry**: Fit and center a pixel canvas on the slide, in EMU
//! - **Patching**: Add a media part, a relationship, a content type and a
//!   `p:pic` frame, keeping every other part byte-for-byte
//! - **SVG Pictures**: `asvg:svgBlip` extension with an optional PNG fallback
//! - **Atomic Output**: Validated package written beside the output and renamed
//!
//! ## Example
//!
//! ```no_run
//! use infodeck_pptx::{embed_asset, BlankDeck, SlideGeometry};
//!
//! std::fs::write("blank.pptx", BlankDeck::new().to_bytes()?)?;
//! let placement = SlideGeometry::default().place(720.0, 243.0, false);
//! let svg = std::fs::read("chart.svg")?;
//! embed_asset("blank.pptx", "chart.pptx", &svg, "svg", placement.rect)?;
//! # Ok::<(), infodeck_pptx::PptxError>(())
//! ```

pub mod deck;
pub mod error;
pub mod geometry;
pub mod patcher;
pub mod picture;
pub mod template;

// Re-exports
pub use deck::BlankDeck;
pub use error::{PptxError, Result};
pub use geometry::{fit_and_center, fit_and_center_at, EmuRect, Fit, Placement, SlideGeometry};
pub use patcher::{embed_asset, Asset, ContainerPatcher, EmbedReport, TitleBox};
pub use template::{load_template, slide_size, target_slide};

/// PPTX-related constants
pub mod constants {
    /// 16:9 slide width in EMU (10")
    pub const WIDESCREEN_SLIDE_WIDTH_EMU: i64 = 9_144_000;

    /// 16:9 slide height in EMU (5.625")
    pub const WIDESCREEN_SLIDE_HEIGHT_EMU: i64 = 5_143_500;

    /// DrawingML font sizes are in hundredths of a point
    pub const HUNDREDTHS_PER_POINT: u32 = 100;

    /// Created/modified stamp for generated decks
    pub const DEFAULT_TIMESTAMP: &str = "2025-01-01T00:00:00Z";

    /// East-asian capable typeface used for generated text
    pub const THEME_FONT: &str = "Noto Sans CJK SC";

    pub const PRESENTATION_PATH: &str = "ppt/presentation.xml";
    pub const MASTER_PATH: &str = "ppt/slideMasters/slideMaster1.xml";
    pub const LAYOUT_PATH: &str = "ppt/slideLayouts/slideLayout1.xml";
    pub const DEFAULT_SLIDE_PATH: &str = "ppt/slides/slide1.xml";
    pub const MEDIA_DIR: &str = "ppt/media";

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Relationships namespace
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Office 2016 SVG picture extension namespace
    pub const NS_SVG_BLIP: &str = "http://schemas.microsoft.com/office/drawing/2016/SVG/main";

    /// `a:ext` uri carrying the SVG blip
    pub const SVG_BLIP_EXT_URI: &str = "{96DAC541-7B7A-43D3-8B79-37D633B846F1}";

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Slide master relationship type
    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Theme relationship type
    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

    /// Image relationship type
    pub const REL_TYPE_IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    pub const CT_PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const CT_TEMPLATE: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.template.main+xml";
    pub const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const CT_SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const CT_SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const CT_PRES_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
    pub const CT_VIEW_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
    pub const CT_TABLE_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
    pub const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const CT_EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
}
