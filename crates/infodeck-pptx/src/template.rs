//! Template loading and inspection.
//!
//! A template is any presentation package with at least one slide. The
//! patcher only reads the slide size and locates the first slide.

use std::path::Path;

use infodeck_ooxml::{resolve_target, Package, Relationships, PACKAGE_RELS_PATH};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::constants::{
    DEFAULT_SLIDE_PATH, PRESENTATION_PATH, WIDESCREEN_SLIDE_HEIGHT_EMU, WIDESCREEN_SLIDE_WIDTH_EMU,
};
use crate::deck::BlankDeck;
use crate::error::{PptxError, Result};

/// Open a template from disk, or build a blank deck when `path` is `None`
pub fn load_template(path: Option<&Path>) -> Result<Package> {
    match path {
        Some(path) => {
            if !path.is_file() {
                return Err(PptxError::template_not_found(path.display().to_string()));
            }
            debug!(template = %path.display(), "Loading template");
            Ok(Package::open(path)?)
        }
        None => Ok(BlankDeck::new().build()),
    }
}

/// Main presentation part: target of the package `officeDocument` relationship
pub fn presentation_part(package: &Package) -> Result<String> {
    let rels = package.relationships("")?;
    let part = rels
        .first_of_type(Relationships::TYPE_OFFICE_DOCUMENT)
        .map(|rel| resolve_target("", &rel.target))
        .unwrap_or_else(|| PRESENTATION_PATH.to_string());
    if !package.contains(&part) {
        return Err(PptxError::invalid_template(format!(
            "main presentation part {} not found (from {})",
            part, PACKAGE_RELS_PATH
        )));
    }
    Ok(part)
}

/// Slide size `(cx, cy)` in EMU from `p:sldSz`; 16:9 when not declared
pub fn slide_size(package: &Package) -> Result<(i64, i64)> {
    let part = presentation_part(package)?;
    let xml = package.require(&part)?;

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut width = WIDESCREEN_SLIDE_WIDTH_EMU;
    let mut height = WIDESCREEN_SLIDE_HEIGHT_EMU;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) if e.local_name().as_ref() == b"sldSz" => {
                for attr in e.attributes().flatten() {
                    let value = std::str::from_utf8(&attr.value).ok().and_then(|v| v.parse().ok());
                    match (attr.key.as_ref(), value) {
                        (b"cx", Some(v)) => width = v,
                        (b"cy", Some(v)) => height = v,
                        _ => {}
                    }
                }
                break;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok((width, height))
}

/// Part name of the first slide in presentation order
///
/// Follows the first `p:sldId` of `p:sldIdLst`, then the first slide
/// relationship, then `ppt/slides/slide1.xml`.
pub fn target_slide(package: &Package) -> Result<String> {
    let presentation = presentation_part(package)?;
    let rels = package.relationships(&presentation)?;

    let by_order = first_slide_rid(package.require(&presentation)?)?
        .and_then(|rid| rels.get_relationship(&rid))
        .filter(|rel| rel.rel_type == Relationships::TYPE_SLIDE && !rel.is_external());
    let slide = by_order
        .or_else(|| rels.first_of_type(Relationships::TYPE_SLIDE))
        .map(|rel| resolve_target(&presentation, &rel.target))
        .unwrap_or_else(|| DEFAULT_SLIDE_PATH.to_string());

    if !package.contains(&slide) {
        return Err(PptxError::invalid_template(format!(
            "template has no slide part ({} not found)",
            slide
        )));
    }
    debug!(slide = %slide, "Target slide");
    Ok(slide)
}

/// `r:id` of the first `p:sldId`
fn first_slide_rid(xml: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) if e.local_name().as_ref() == b"sldId" => {
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"id" && attr.key.prefix().is_some() {
                        return Ok(Some(String::from_utf8_lossy(&attr.value).into_owned()));
                    }
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}
