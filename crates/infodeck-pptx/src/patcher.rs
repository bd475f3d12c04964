//! In-place patching of a presentation package.
//!
//! The patcher holds the whole package in memory and touches only the parts
//! it has to: the new media part, the target slide, the slide's `.rels` part
//! and `[Content_Types].xml`. Everything else is written back unchanged.

use std::io::Write;
use std::path::Path;

use infodeck_ooxml::{
    content_type_for_extension, relative_target, Package, Relationship, Relationships,
};
use quick_xml::events::{BytesEnd, Event};
use quick_xml::{Reader, Writer};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::constants::{CT_PRESENTATION, CT_TEMPLATE, MEDIA_DIR};
use crate::error::{PptxError, Result};
use crate::geometry::EmuRect;
use crate::picture::{picture_xml, title_xml, PictureFrame};
use crate::template::{load_template, presentation_part, target_slide};

/// Bytes to embed plus their file extension
#[derive(Debug, Clone, Copy)]
pub struct Asset<'a> {
    pub bytes: &'a [u8],
    pub extension: &'a str,
}

impl<'a> Asset<'a> {
    pub fn new(bytes: &'a [u8], extension: &'a str) -> Self {
        Self { bytes, extension }
    }

    pub fn svg(bytes: &'a [u8]) -> Self {
        Self::new(bytes, "svg")
    }

    pub fn png(bytes: &'a [u8]) -> Self {
        Self::new(bytes, "png")
    }

    /// Lower-case extension without a leading dot
    fn normalized_extension(&self) -> Result<String> {
        let ext = self.extension.trim_start_matches('.').to_ascii_lowercase();
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PptxError::image_error(format!(
                "invalid extension {:?}",
                self.extension
            )));
        }
        Ok(ext)
    }
}

/// Native title text above the picture
#[derive(Debug, Clone)]
pub struct TitleBox {
    pub text: String,
    pub rect: EmuRect,
    pub size_pt: u32,
}

impl TitleBox {
    pub fn new(text: impl Into<String>, rect: EmuRect) -> Self {
        Self {
            text: text.into(),
            rect,
            size_pt: 24,
        }
    }
}

/// What an embed added to the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
    pub slide: String,
    pub media_part: String,
    pub relationship_id: String,
    pub fallback_part: Option<String>,
    pub shape_id: u32,
}

/// Mutable view over a template package and its target slide
#[derive(Debug)]
pub struct ContainerPatcher {
    package: Package,
    slide: String,
}

impl ContainerPatcher {
    /// Wrap a package, locating the slide to patch
    ///
    /// A `.potx` main part is retyped as a presentation, since the output
    /// is always written as a `.pptx`.
    pub fn new(mut package: Package) -> Result<Self> {
        let slide = target_slide(&package)?;
        retype_template(&mut package)?;
        Ok(Self { package, slide })
    }

    /// Open a template file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(load_template(Some(path.as_ref()))?)
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn into_package(self) -> Package {
        self.package
    }

    /// Slide receiving new shapes
    pub fn slide(&self) -> &str {
        &self.slide
    }

    /// `ppt/media/image{n}.{ext}` with the smallest `n` no media part uses
    pub fn next_media_part(&self, extension: &str) -> String {
        let names = self.package.part_names();
        let taken = |n: usize| {
            let stem = format!("{}/image{}.", MEDIA_DIR, n);
            names.iter().any(|name| name.starts_with(&stem))
        };
        let n = (1..).find(|&n| !taken(n)).unwrap_or(1);
        format!("{}/image{}.{}", MEDIA_DIR, n, extension)
    }

    /// Add a media part, link it from the slide and register its content
    /// type. Returns `(part, relationship id)`.
    pub fn add_media(&mut self, asset: &Asset<'_>) -> Result<(String, String)> {
        if asset.bytes.is_empty() {
            return Err(PptxError::image_error("asset is empty"));
        }
        let ext = asset.normalized_extension()?;
        let part = self.next_media_part(&ext);

        let mut rels = self.package.relationships(&self.slide)?;
        let id = rels.next_id();
        rels.insert(Relationship {
            id: id.clone(),
            rel_type: Relationships::TYPE_IMAGE.to_string(),
            target: relative_target(&self.slide, &part),
            target_mode: None,
        })?;

        let mut types = self.package.content_types()?;
        let mut types_changed = types.ensure_default(
            "rels",
            content_type_for_extension("rels"),
        );
        if types.override_for(&part).is_none() {
            types_changed |= types.ensure_default(&ext, content_type_for_extension(&ext));
        }

        self.package.set(part.clone(), asset.bytes.to_vec());
        self.package.set_relationships(&self.slide, &rels);
        if types_changed {
            self.package.set_content_types(&types);
        }

        debug!(part = %part, rid = %id, bytes = asset.bytes.len(), "Added media part");
        Ok((part, id))
    }

    /// Embed `asset` as a picture covering `rect`
    ///
    /// SVG assets get the `asvg:svgBlip` extension. When a raster `fallback`
    /// is given it becomes the primary blip for consumers without SVG support.
    pub fn embed(
        &mut self,
        asset: &Asset<'_>,
        fallback: Option<&Asset<'_>>,
        rect: EmuRect,
        name: &str,
    ) -> Result<EmbedReport> {
        let is_svg = asset.normalized_extension()? == "svg";
        let (media_part, rid) = self.add_media(asset)?;

        let (fallback_part, blip_rid) = match fallback {
            Some(fallback) => {
                let (part, fallback_rid) = self.add_media(fallback)?;
                (Some(part), fallback_rid)
            }
            None => (None, rid.clone()),
        };

        let svg_rid = is_svg.then_some(rid.as_str());
        let shape_id = self.append_shape(|prefix, shape_id| {
            picture_xml(
                prefix,
                &PictureFrame {
                    shape_id,
                    name,
                    description: None,
                    blip_rid: &blip_rid,
                    svg_rid,
                    rect,
                },
            )
        })?;

        Ok(EmbedReport {
            slide: self.slide.clone(),
            media_part,
            relationship_id: rid,
            fallback_part,
            shape_id,
        })
    }

    /// Append a native title text box; returns its shape id
    pub fn add_title(&mut self, title: &TitleBox) -> Result<u32> {
        self.append_shape(|prefix, shape_id| {
            title_xml(prefix, shape_id, &title.text, title.size_pt, title.rect)
        })
    }

    /// Append the fragment built by `build(prefix, shape_id)` to the slide's
    /// shape tree
    fn append_shape<F>(&mut self, build: F) -> Result<u32>
    where
        F: FnOnce(&str, u32) -> String,
    {
        let xml = self.package.require(&self.slide)?;
        let scan = scan_slide(xml)?;
        let prefix = scan.tree_prefix.ok_or_else(|| {
            PptxError::invalid_template(format!("{} has no p:spTree", self.slide))
        })?;
        let shape_id = scan.max_shape_id + 1;
        let fragment = build(&prefix, shape_id);
        let patched = append_to_sp_tree(xml, &fragment)?;
        self.package.set(self.slide.clone(), patched);
        debug!(slide = %self.slide, shape_id, "Appended shape");
        Ok(shape_id)
    }

    /// Validate and write the package to `output` atomically
    ///
    /// The package goes to a temporary file in the output directory first and
    /// is renamed over `output` only once complete. On failure the temporary
    /// file is removed and `output` is left as it was.
    pub fn write_atomic<P: AsRef<Path>>(&self, output: P) -> Result<()> {
        let output = output.as_ref();
        self.package.validate()?;

        let parent = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(parent)?;
        self.package.write_to(tmp.as_file_mut())?;
        tmp.as_file().sync_all()?;
        tmp.persist(output).map_err(|e| e.error)?;

        info!(output = %output.display(), parts = self.package.len(), "Wrote presentation");
        Ok(())
    }
}

/// Embed `bytes` into the first slide of the template at `template_path` and
/// write the result to `output_path`
pub fn embed_asset<P: AsRef<Path>, Q: AsRef<Path>>(
    template_path: P,
    output_path: Q,
    bytes: &[u8],
    extension: &str,
    placement: EmuRect,
) -> Result<EmbedReport> {
    let mut patcher = ContainerPatcher::open(template_path)?;
    let report = patcher.embed(&Asset::new(bytes, extension), None, placement, "Picture")?;
    patcher.write_atomic(output_path)?;
    Ok(report)
}

struct SlideScan {
    max_shape_id: u32,
    /// Prefix of the `spTree` element; `None` when the slide has none
    tree_prefix: Option<String>,
}

/// Switch a template main part to the presentation content type
fn retype_template(package: &mut Package) -> Result<()> {
    let part = presentation_part(package)?;
    let mut types = package.content_types()?;
    if types.override_for(&part) == Some(CT_TEMPLATE) {
        debug!(part = %part, "Retyping template main part as presentation");
        types.set_override(&part, CT_PRESENTATION);
        package.set_content_types(&types);
    }
    Ok(())
}

fn scan_slide(xml: &[u8]) -> Result<SlideScan> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut scan = SlideScan {
        max_shape_id: 0,
        tree_prefix: None,
    };

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"spTree" if scan.tree_prefix.is_none() => {
                    let prefix = e
                        .name()
                        .prefix()
                        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
                        .unwrap_or_default();
                    scan.tree_prefix = Some(prefix);
                }
                b"cNvPr" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"id" {
                            let id = std::str::from_utf8(&attr.value)
                                .ok()
                                .and_then(|v| v.trim().parse::<u32>().ok());
                            if let Some(id) = id {
                                scan.max_shape_id = scan.max_shape_id.max(id);
                            }
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(scan)
}

/// Copy `xml` event by event, writing `fragment` just before the first
/// `spTree` closes
fn append_to_sp_tree(xml: &[u8], fragment: &str) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + fragment.len()));
    let mut buf = Vec::new();
    let mut inserted = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::End(e) if !inserted && e.local_name().as_ref() == b"spTree" => {
                writer.get_mut().write_all(fragment.as_bytes())?;
                writer.write_event(Event::End(e))?;
                inserted = true;
            }
            Event::Empty(e) if !inserted && e.local_name().as_ref() == b"spTree" => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                writer.write_event(Event::Start(e))?;
                writer.get_mut().write_all(fragment.as_bytes())?;
                writer.write_event(Event::End(BytesEnd::new(name)))?;
                inserted = true;
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
        buf.clear();
    }

    if !inserted {
        return Err(PptxError::invalid_template("slide has no p:spTree"));
    }
    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::BlankDeck;

    const SVG: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="720" height="243"/>"#;

    fn rect() -> EmuRect {
        EmuRect::new(228_600, 1_105_000, 8_686_800, 2_931_000)
    }

    #[test]
    fn test_next_media_part_skips_taken_numbers() {
        let mut package = BlankDeck::new().build();
        package.set("ppt/media/image1.png", vec![1]);
        package.set("ppt/media/image3.svg", vec![1]);
        let patcher = ContainerPatcher::new(package).unwrap();
        assert_eq!(patcher.next_media_part("svg"), "ppt/media/image2.svg");
    }

    #[test]
    fn test_embed_svg_into_blank_deck() {
        let mut patcher = ContainerPatcher::new(BlankDeck::new().build()).unwrap();
        let report = patcher.embed(&Asset::svg(SVG), None, rect(), "Infographic").unwrap();

        assert_eq!(report.media_part, "ppt/media/image1.svg");
        assert_eq!(report.relationship_id, "rId2");
        assert_eq!(report.shape_id, 2);

        let package = patcher.package();
        package.validate().unwrap();
        let rels = package.relationships("ppt/slides/slide1.xml").unwrap();
        assert_eq!(rels.get("rId2"), Some("../media/image1.svg"));
        assert!(rels.is_image("rId2"));

        let slide = package.get_string("ppt/slides/slide1.xml").unwrap();
        assert!(slide.contains(r#"<a:blip r:embed="rId2">"#));
        assert!(slide.contains(r#"<asvg:svgBlip "#));
        assert!(slide.contains("</p:pic></p:spTree>"));
        let types = package.content_types().unwrap();
        assert_eq!(types.default_for("svg"), Some("image/svg+xml"));
    }

    #[test]
    fn test_embed_with_png_fallback() {
        let mut patcher = ContainerPatcher::new(BlankDeck::new().build()).unwrap();
        let report = patcher
            .embed(&Asset::svg(SVG), Some(&Asset::png(b"\x89PNG")), rect(), "Infographic")
            .unwrap();
        assert_eq!(report.fallback_part.as_deref(), Some("ppt/media/image2.png"));

        let slide = patcher.package().get_string("ppt/slides/slide1.xml").unwrap();
        assert!(slide.contains(r#"<a:blip r:embed="rId3">"#));
        assert!(slide.contains(r#"r:embed="rId2"/></a:ext>"#));
        patcher.package().validate().unwrap();
    }

    #[test]
    fn test_title_gets_next_shape_id() {
        let mut patcher = ContainerPatcher::new(BlankDeck::new().build()).unwrap();
        let report = patcher.embed(&Asset::svg(SVG), None, rect(), "Infographic").unwrap();
        let title_id = patcher
            .add_title(&TitleBox::new("季度报告", EmuRect::new(0, 0, 10, 10)))
            .unwrap();
        assert_eq!(title_id, report.shape_id + 1);
        let slide = patcher.package().get_string("ppt/slides/slide1.xml").unwrap();
        assert!(slide.contains("<a:t>季度报告</a:t>"));
    }

    #[test]
    fn test_content_type_not_duplicated() {
        let mut patcher = ContainerPatcher::new(BlankDeck::new().build()).unwrap();
        patcher.embed(&Asset::svg(SVG), None, rect(), "One").unwrap();
        patcher.embed(&Asset::new(SVG, "SVG"), None, rect(), "Two").unwrap();
        let types = patcher.package().content_types().unwrap();
        let svg_defaults = types
            .defaults()
            .iter()
            .filter(|d| d.extension.eq_ignore_ascii_case("svg"))
            .count();
        assert_eq!(svg_defaults, 1);
    }

    #[test]
    fn test_empty_sp_tree_is_expanded() {
        let xml = br#"<p:sld xmlns:p="urn:p"><p:cSld><p:spTree/></p:cSld></p:sld>"#;
        let out = append_to_sp_tree(xml, "<p:pic/>").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"<p:sld xmlns:p="urn:p"><p:cSld><p:spTree><p:pic/></p:spTree></p:cSld></p:sld>"#
        );
    }

    #[test]
    fn test_siblings_copied_unchanged() {
        let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<p:sld xmlns:p=\"urn:p\">\n  <p:cSld><p:spTree><p:sp><p:txBody>a &amp; b</p:txBody></p:sp></p:spTree></p:cSld>\n</p:sld>";
        let out = append_to_sp_tree(xml.as_bytes(), "<p:pic/>").unwrap();
        let expected = xml.replace("</p:sp></p:spTree>", "</p:sp><p:pic/></p:spTree>");
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_scan_slide() {
        let xml = br#"<sld><cSld><spTree><nvGrpSpPr><cNvPr id="1" name=""/></nvGrpSpPr><sp><nvSpPr><cNvPr id="7" name="x"/></nvSpPr></sp></spTree></cSld></sld>"#;
        let scan = scan_slide(xml).unwrap();
        assert_eq!(scan.max_shape_id, 7);
        assert_eq!(scan.tree_prefix.as_deref(), Some(""));
    }

    #[test]
    fn test_slide_without_sp_tree() {
        let mut package = BlankDeck::new().build();
        package.set_string("ppt/slides/slide1.xml", "<p:sld xmlns:p=\"urn:p\"/>");
        let mut patcher = ContainerPatcher::new(package).unwrap();
        let err = patcher.embed(&Asset::svg(SVG), None, rect(), "x").unwrap_err();
        assert!(matches!(err, PptxError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_rejects_empty_asset_and_bad_extension() {
        let mut patcher = ContainerPatcher::new(BlankDeck::new().build()).unwrap();
        assert!(patcher.add_media(&Asset::svg(b"")).is_err());
        assert!(patcher.add_media(&Asset::new(SVG, "../x")).is_err());
        assert_eq!(patcher.add_media(&Asset::new(SVG, ".SVG")).unwrap().0, "ppt/media/image1.svg");
    }
}
