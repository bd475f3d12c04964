//! Serialize a [`Document`] back to markup.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::tree::{Document, NodeData, NodeId};

/// Write the reachable tree as UTF-8 markup.
///
/// Elements without children are written in empty-element form. Attribute
/// order and qualified names are preserved.
pub fn to_string(doc: &Document) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    for &child in doc.children(NodeId::ROOT) {
        write_node(doc, child, &mut writer)?;
    }
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_node(doc: &Document, id: NodeId, writer: &mut Writer<Vec<u8>>) -> Result<()> {
    let node = doc.node(id);
    match &node.data {
        NodeData::Document => {
            for &child in &node.children {
                write_node(doc, child, writer)?;
            }
        }
        NodeData::Declaration(decl) => {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
        }
        NodeData::Doctype(raw) => {
            writer.write_event(Event::DocType(BytesText::from_escaped(raw.as_str())))?;
        }
        NodeData::Element(element) => {
            let mut start = BytesStart::new(element.name.as_str());
            for attr in &element.attributes {
                start.push_attribute((attr.name.as_str(), attr.value.as_str()));
            }
            if node.children.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for &child in &node.children {
                    write_node(doc, child, writer)?;
                }
                writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
            }
        }
        NodeData::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        NodeData::CData(text) => {
            writer.write_event(Event::CData(BytesCData::new(text.as_str())))?;
        }
        NodeData::Comment(raw) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))?;
        }
        NodeData::ProcessingInstruction(raw) => {
            writer.write_event(Event::PI(BytesPI::new(raw.as_str())))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;

    #[test]
    fn test_reserialize_is_stable() {
        let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="10"><!--c--><g id="a"><rect x="1"/></g><text>a &amp; b</text></svg>"#;
        let doc = parse_document(input).unwrap();
        let out = to_string(&doc).unwrap();
        assert_eq!(out, input);
        assert_eq!(parse_document(&out).unwrap(), doc);
    }

    #[test]
    fn test_empty_elements_collapse() {
        let doc = parse_document(r#"<svg><g></g></svg>"#).unwrap();
        assert_eq!(to_string(&doc).unwrap(), "<svg><g/></svg>");
    }

    #[test]
    fn test_attribute_values_escaped() {
        let doc = parse_document(r#"<svg><a title="&quot;x&quot; &lt; y"/></svg>"#).unwrap();
        let out = to_string(&doc).unwrap();
        assert!(out.contains(r#"title="&quot;x&quot; &lt; y""#));
    }
}
