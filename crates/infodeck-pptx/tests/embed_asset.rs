//! End-to-end patching of template files on disk.

use std::io::{Cursor, Write};
use std::path::Path;

use infodeck_ooxml::{resolve_target, source_part_for, Package, Relationships};
use infodeck_pptx::{embed_asset, BlankDeck, ContainerPatcher, EmuRect, PptxError, SlideGeometry};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 720 243"><rect width="720" height="243" fill="#fff"/></svg>"##;

/// Presentation written by another tool: default namespace on the slide,
/// no slide `.rels` part, an existing picture and a PNG Override.
fn foreign_template() -> Vec<u8> {
    let parts: &[(&str, &str)] = &[
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/media/image1.png" ContentType="image/png"/></Types>"#,
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/ppt/presentation.xml"/></Relationships>"#,
        ),
        (
            "ppt/presentation.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldIdLst><p:sldId id="256" r:id="rId1"/></p:sldIdLst><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#,
        ),
        (
            "ppt/_rels/presentation.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/></Relationships>"#,
        ),
        (
            "ppt/slides/slide1.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sld xmlns="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><cSld><spTree><nvGrpSpPr><cNvPr id="1" name=""/><cNvGrpSpPr/><nvPr/></nvGrpSpPr><grpSpPr/><sp><nvSpPr><cNvPr id="9" name="Logo"/><cNvSpPr/><nvPr/></nvSpPr><spPr/></sp></spTree></cSld></sld>"#,
        ),
        ("ppt/media/image1.png", "png-bytes"),
    ];

    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    for (path, contents) in parts {
        zip.start_file(*path, SimpleFileOptions::default()).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    buffer.into_inner()
}

fn relationship_count(package: &Package) -> usize {
    package
        .part_names()
        .into_iter()
        .filter_map(|name| source_part_for(name).map(|source| (name, source)))
        .map(|(name, _)| Relationships::parse(package.get(name).unwrap()).unwrap().len())
        .sum()
}

fn assert_targets_resolve(package: &Package) {
    for name in package.part_names() {
        let Some(source) = source_part_for(name) else {
            continue;
        };
        let rels = Relationships::parse(package.get(name).unwrap()).unwrap();
        for rel in rels.iter().filter(|r| !r.is_external()) {
            let target = resolve_target(&source, &rel.target);
            assert!(package.contains(&target), "{} -> {} missing", name, target);
        }
    }
}

fn write_blank_template(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("blank.pptx");
    std::fs::write(&path, BlankDeck::new().to_bytes().unwrap()).unwrap();
    path
}

#[test]
fn embed_adds_one_part_and_one_relationship() {
    let dir = TempDir::new().unwrap();
    let template = write_blank_template(dir.path());
    let output = dir.path().join("out.pptx");

    let before = Package::open(&template).unwrap();
    let placement = SlideGeometry::default().place(720.0, 243.0, false);
    let report = embed_asset(&template, &output, SVG, "svg", placement.rect).unwrap();

    let after = Package::open(&output).unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(relationship_count(&after), relationship_count(&before) + 1);
    assert_targets_resolve(&after);
    after.validate().unwrap();

    assert_eq!(after.get(&report.media_part), Some(SVG));
    for name in before.part_names() {
        if name != "ppt/slides/slide1.xml" && !name.ends_with(".rels") && name != "[Content_Types].xml" {
            assert_eq!(before.get(name), after.get(name), "{} changed", name);
        }
    }
}

#[test]
fn foreign_template_is_patched_consistently() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("foreign.pptx");
    std::fs::write(&template, foreign_template()).unwrap();
    let output = dir.path().join("foreign-out.pptx");

    let report = embed_asset(&template, &output, SVG, "svg", EmuRect::new(0, 0, 100, 100)).unwrap();
    assert_eq!(report.media_part, "ppt/media/image2.svg");
    assert_eq!(report.relationship_id, "rId1");
    assert_eq!(report.shape_id, 10);

    let package = Package::open(&output).unwrap();
    package.validate().unwrap();
    assert!(package.contains("ppt/slides/_rels/slide1.xml.rels"));
    let slide = package.get_string("ppt/slides/slide1.xml").unwrap();
    assert!(slide.contains(r#"<pic xmlns:a="#));
    assert!(slide.contains(r#"<cNvPr id="10" name="Picture"/>"#));

    let types = package.content_types().unwrap();
    assert_eq!(types.default_for("svg"), Some("image/svg+xml"));
    assert!(types.default_for("png").is_none());
}

#[test]
fn failed_embed_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("broken.pptx");
    let mut package = BlankDeck::new().build();
    // Dangling relationship: validation must refuse to write.
    let mut rels = package.relationships("ppt/slides/slide1.xml").unwrap();
    rels.add("../media/missing.png", Relationships::TYPE_IMAGE);
    package.set_relationships("ppt/slides/slide1.xml", &rels);
    package.write_to_file(&template).unwrap();

    let output = dir.path().join("out.pptx");
    let err = embed_asset(&template, &output, SVG, "svg", EmuRect::new(0, 0, 1, 1)).unwrap_err();
    assert!(err.is_integrity_violation());
    assert!(!output.exists());

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "unexpected files: {:?}", leftovers);
}

#[test]
fn missing_template_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = embed_asset(
        dir.path().join("nope.pptx"),
        dir.path().join("out.pptx"),
        SVG,
        "svg",
        EmuRect::new(0, 0, 1, 1),
    )
    .unwrap_err();
    assert!(matches!(err, PptxError::TemplateNotFound { .. }));
}

#[test]
fn title_and_picture_on_blank_deck() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("titled.pptx");
    let geometry = SlideGeometry::default();

    let mut patcher = ContainerPatcher::new(BlankDeck::new().with_title("销售").build()).unwrap();
    let placement = geometry.place(720.0, 243.0, true);
    patcher
        .add_title(&infodeck_pptx::TitleBox::new("销售概览", geometry.title_rect()))
        .unwrap();
    patcher
        .embed(&infodeck_pptx::Asset::svg(SVG), None, placement.rect, "Infographic")
        .unwrap();
    patcher.write_atomic(&output).unwrap();

    let package = Package::open(&output).unwrap();
    let slide = package.get_string("ppt/slides/slide1.xml").unwrap();
    let title_at = slide.find("销售概览").unwrap();
    let pic_at = slide.find("<p:pic ").unwrap();
    assert!(title_at < pic_at);
    assert!(placement.rect.y >= geometry.title_rect().bottom());
}

#[test]
fn potx_template_yields_presentation_main_part() {
    use infodeck_pptx::constants::{CT_PRESENTATION, CT_TEMPLATE, PRESENTATION_PATH};

    let dir = TempDir::new().unwrap();
    let template = dir.path().join("brand.potx");
    let mut package = BlankDeck::new().build();
    let mut types = package.content_types().unwrap();
    types.set_override(PRESENTATION_PATH, CT_TEMPLATE);
    package.set_content_types(&types);
    package.write_to_file(&template).unwrap();

    let output = dir.path().join("out.pptx");
    embed_asset(&template, &output, SVG, "svg", EmuRect::new(0, 0, 100, 100)).unwrap();

    let after = Package::open(&output).unwrap();
    after.validate().unwrap();
    let types = after.content_types().unwrap();
    assert_eq!(types.override_for(PRESENTATION_PATH), Some(CT_PRESENTATION));
    assert!(types.overrides().iter().all(|o| o.content_type != CT_TEMPLATE));
}
