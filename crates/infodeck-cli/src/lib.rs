//! infodeck CLI - Command-line interface library
//!
//! This library provides the CLI functionality for infodeck:
//! - Export: Convert an infographic SVG to SVG, PNG, PDF or PPTX
//! - Normalize: Rewrite `foreignObject` text into native `<text>`
//! - Check: Report presentation compatibility of an SVG
//! - Cleanup: Remove a previous export
//! - Formats: List the export formats of this build
//!
//! # Library Usage
//!
//! ```ignore
//! use infodeck_cli::{export_command, ExportArgs};
//!
//! let result = export_command(&ExportArgs::new("chart.svg", ExportFormat::Pptx))?;
//! println!("{}", result.storage_path.display());
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Editable slide with a title
//! infodeck export chart.svg -f pptx --title "Q1 Sales"
//!
//! # Presentation-safe SVG
//! infodeck normalize chart.svg -o chart.normalized.svg
//!
//! # Compatibility report for CI
//! infodeck check chart.svg --format json --strict
//! ```

pub mod app;

pub use app::{
    check_command, cleanup_command, export_command, formats_command, load_config,
    normalize_command,
};
pub use app::{run_cli, ExportArgs, OutputFormat};
