//! # infodeck-export
//!
//! Export orchestration for infographic SVGs.
//!
//! | Format | Strategy | Pipeline |
//! |--------|----------|----------|
//! | `svg`  | [`SvgStrategy`] | write-out, optional text normalization |
//! | `png`  | [`PngStrategy`] | normalize → resvg |
//! | `pdf`  | [`PdfStrategy`] | normalize → svg2pdf (`pdf` feature) |
//! | `pptx` | [`PptxStrategy`] | normalize → fit → patch template → atomic write |
//!
//! All outputs land in one managed directory ([`ExportConfig`]'s
//! `output.dir`) and are addressed by their file name.

pub mod config;
pub mod error;
pub mod format;
pub mod request;
pub mod service;
pub mod strategy;

pub use config::{ExportConfig, OutputConfig, RasterConfig, SlideConfig};
pub use error::{ExportError, Result};
pub use format::{ExportFormat, FormatDescriptor};
pub use request::{ExportOptions, ExportResult};
pub use service::ExportService;
pub use strategy::{
    ExportStrategy, PdfStrategy, PngStrategy, PptxStrategy, SvgStrategy, Written,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
