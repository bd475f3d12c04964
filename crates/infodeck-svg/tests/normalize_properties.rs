//! Property tests for text normalization and font mapping.

use infodeck_svg::{
    map_font, normalize, parse_document, to_string, Document, SANS_FAMILY, SERIF_FAMILY,
};
use proptest::prelude::*;

/// One child of the root: either a plain shape or a text container.
#[derive(Debug, Clone)]
enum Piece {
    Rect(u16),
    Block { x: u16, y: u16, text: String },
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        any::<u16>().prop_map(Piece::Rect),
        (any::<u16>(), any::<u16>(), "[a-zA-Z0-9一二三四五 ]{0,12}")
            .prop_map(|(x, y, text)| Piece::Block { x, y, text }),
    ]
}

fn render(pieces: &[Piece]) -> String {
    let mut body = String::new();
    for p in pieces {
        match p {
            Piece::Rect(w) => body.push_str(&format!(r#"<rect width="{}"/>"#, w)),
            Piece::Block { x, y, text } => body.push_str(&format!(
                r#"<foreignObject x="{}" y="{}" width="40" height="20"><span style="text-align:center">{}</span></foreignObject>"#,
                x, y, text
            )),
        }
    }
    format!(r#"<svg xmlns="http://www.w3.org/2000/svg">{}</svg>"#, body)
}

fn root_names(doc: &Document) -> Vec<String> {
    let root = doc.root_element().unwrap();
    doc.children(root)
        .iter()
        .filter_map(|&c| doc.element(c))
        .map(|e| e.name.clone())
        .collect()
}

proptest! {
    #[test]
    fn documents_without_containers_are_unchanged(widths in prop::collection::vec(any::<u16>(), 0..8)) {
        let pieces: Vec<_> = widths.into_iter().map(Piece::Rect).collect();
        let mut doc = parse_document(&render(&pieces)).unwrap();
        let before = doc.clone();
        let report = normalize(&mut doc);
        prop_assert_eq!(report.replaced, 0);
        prop_assert_eq!(doc, before);
    }

    #[test]
    fn each_non_empty_block_becomes_one_text(pieces in prop::collection::vec(piece(), 0..10)) {
        let mut doc = parse_document(&render(&pieces)).unwrap();
        let containers_before = doc.count_local_name("foreignObject");
        let texts_before = doc.count_local_name("text");
        let names_before = root_names(&doc);

        normalize(&mut doc);

        let eligible = pieces
            .iter()
            .filter(|p| matches!(p, Piece::Block { text, .. } if !text.trim().is_empty()))
            .count();
        prop_assert_eq!(doc.count_local_name("foreignObject"), containers_before - eligible);
        prop_assert_eq!(doc.count_local_name("text"), texts_before + eligible);

        // Same slots, only the renamed ones differ.
        let names_after = root_names(&doc);
        prop_assert_eq!(names_before.len(), names_after.len());
        for (before, after) in names_before.iter().zip(&names_after) {
            prop_assert!(before == after || (before == "foreignObject" && after == "text"));
        }
    }

    #[test]
    fn normalize_is_idempotent(pieces in prop::collection::vec(piece(), 0..10)) {
        let mut once = parse_document(&render(&pieces)).unwrap();
        normalize(&mut once);
        let mut twice = once.clone();
        let report = normalize(&mut twice);
        prop_assert_eq!(report.replaced, 0);
        prop_assert_eq!(to_string(&twice).unwrap(), to_string(&once).unwrap());
    }

    #[test]
    fn map_font_never_empty(family in ".{0,40}") {
        let mapped = map_font(&family);
        prop_assert!(mapped == SANS_FAMILY || mapped == SERIF_FAMILY);
    }

    #[test]
    fn sans_serif_anywhere_maps_to_sans(prefix in "[a-zA-Z ,']{0,20}", suffix in "[a-zA-Z ,']{0,20}", upper in any::<bool>()) {
        let token = if upper { "SANS-SERIF" } else { "sans-serif" };
        let family = format!("{}{}{}", prefix, token, suffix);
        prop_assert_eq!(map_font(&family), SANS_FAMILY);
    }
}
