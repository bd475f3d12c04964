//! # infodeck-ooxml
//!
//! Open Packaging Convention plumbing shared by the presentation writer:
//! - unpack and repack ZIP packages as an in-memory part map
//! - parse and extend relationship parts
//! - parse and extend the content type registry
//! - validate cross-part invariants before writing
//!
//! ## Example
//!
//! ```no_run
//! use infodeck_ooxml::{Package, Relationships};
//!
//! let mut package = Package::open("deck.pptx")?;
//! let mut rels = package.relationships("ppt/slides/slide1.xml")?;
//! rels.add("../media/image1.svg", Relationships::TYPE_IMAGE);
//! package.set_relationships("ppt/slides/slide1.xml", &rels);
//! package.validate()?;
//! # Ok::<(), infodeck_ooxml::OoxmlError>(())
//! ```

pub mod content_types;
pub mod error;
pub mod package;
pub mod relationships;
pub mod units;

#[cfg(test)]
pub(crate) mod test_utils;

pub use content_types::{ContentTypes, CONTENT_TYPES_PATH};
pub use error::{OoxmlError, Result};
pub use package::{
    rels_path_for, relative_target, resolve_target, source_part_for, Package, PACKAGE_RELS_PATH,
};
pub use relationships::{Relationship, Relationships};
pub use units::{
    content_type_for_extension, emu_to_inches, emu_to_pixels, inches_to_emu, pixels_to_emu,
    DEFAULT_DPI, EMU_PER_INCH, EMU_PER_PIXEL, EMU_PER_POINT,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
