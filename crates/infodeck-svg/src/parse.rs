//! Namespace-aware SVG parsing into a [`Document`].
//!
//! Parsing is strict: duplicate attributes, unbound prefixes, mismatched end
//! tags and elements left open at end of input are all rejected.
//! [`parse_lenient`] adds a single retry with default namespace declarations
//! stripped, which recovers the common case of generators that emit `xmlns`
//! twice on the same element.

use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Result, SvgError};
use crate::tree::{Declaration, Document, Element, NodeData, NodeId};

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Matches a default namespace declaration (`xmlns="..."`), not prefixed ones.
const DEFAULT_XMLNS_PATTERN: &str = r#"\s+xmlns\s*=\s*("[^"]*"|'[^']*')"#;

/// Parse SVG markup strictly.
pub fn parse_document(input: &str) -> Result<Document> {
    let mut reader = NsReader::from_str(input);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = true;

    let mut doc = Document::new();
    let mut stack: Vec<NodeId> = vec![NodeId::ROOT];

    loop {
        let (unknown_prefix, event) = {
            let (resolved, event) = reader.read_resolved_event()?;
            let unknown = match resolved {
                ResolveResult::Unknown(prefix) => Some(String::from_utf8_lossy(&prefix).into_owned()),
                _ => None,
            };
            (unknown, event)
        };

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if let Some(prefix) = unknown_prefix {
                    return Err(SvgError::malformed(format!(
                        "unbound namespace prefix '{}' on <{}>",
                        prefix, name
                    )));
                }

                let mut element = Element::new(name);
                for attr in e.attributes() {
                    let attr = attr?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    if !is_reserved_attribute(&key) {
                        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attr.key) {
                            return Err(SvgError::malformed(format!(
                                "unbound namespace prefix '{}' on attribute {}",
                                String::from_utf8_lossy(&prefix),
                                key
                            )));
                        }
                    }
                    let value = attr.unescape_value_with(resolve_entity)?.into_owned();
                    element.attributes.push(crate::tree::Attribute { name: key, value });
                }

                let parent = *stack.last().unwrap_or(&NodeId::ROOT);
                if parent == NodeId::ROOT && doc.root_element().is_some() {
                    return Err(SvgError::malformed("more than one root element"));
                }
                let id = doc.append(parent, NodeData::Element(element));
                if matches!(event, Event::Start(_)) {
                    stack.push(id);
                }
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let open = match stack.pop() {
                    Some(id) if id != NodeId::ROOT => id,
                    _ => {
                        return Err(SvgError::malformed(format!("unexpected </{}>", name)));
                    }
                };
                let open_name = doc.element(open).map(|el| el.name.as_str()).unwrap_or("");
                if open_name != name {
                    return Err(SvgError::malformed(format!(
                        "expected </{}>, found </{}>",
                        open_name, name
                    )));
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape_with(resolve_entity)?.into_owned();
                let parent = *stack.last().unwrap_or(&NodeId::ROOT);
                if parent == NodeId::ROOT && !text.trim().is_empty() {
                    return Err(SvgError::malformed("text outside the root element"));
                }
                doc.append(parent, NodeData::Text(text));
            }
            Event::CData(ref e) => {
                let parent = *stack.last().unwrap_or(&NodeId::ROOT);
                doc.append(parent, NodeData::CData(String::from_utf8_lossy(e).into_owned()));
            }
            Event::Comment(ref e) => {
                let parent = *stack.last().unwrap_or(&NodeId::ROOT);
                doc.append(parent, NodeData::Comment(String::from_utf8_lossy(e).into_owned()));
            }
            Event::PI(ref e) => {
                let parent = *stack.last().unwrap_or(&NodeId::ROOT);
                doc.append(
                    parent,
                    NodeData::ProcessingInstruction(String::from_utf8_lossy(e).into_owned()),
                );
            }
            Event::Decl(ref e) => {
                let version = String::from_utf8_lossy(&e.version()?).into_owned();
                let encoding = match e.encoding() {
                    Some(enc) => Some(String::from_utf8_lossy(&enc?).into_owned()),
                    None => None,
                };
                let standalone = match e.standalone() {
                    Some(sa) => Some(String::from_utf8_lossy(&sa?).into_owned()),
                    None => None,
                };
                doc.append(
                    NodeId::ROOT,
                    NodeData::Declaration(Declaration {
                        version,
                        encoding,
                        standalone,
                    }),
                );
            }
            Event::DocType(ref e) => {
                doc.append(
                    NodeId::ROOT,
                    NodeData::Doctype(String::from_utf8_lossy(e).into_owned()),
                );
            }
            Event::Eof => break,
        }
    }

    if stack.len() > 1 {
        let unclosed = stack
            .last()
            .and_then(|&id| doc.element(id))
            .map(|e| e.name.clone())
            .unwrap_or_default();
        return Err(SvgError::malformed(format!(
            "unclosed <{}> at end of input",
            unclosed
        )));
    }
    if doc.root_element().is_none() {
        return Err(SvgError::malformed("no root element"));
    }

    Ok(doc)
}

/// Parse, retrying once with default namespace declarations removed.
///
/// After a successful retry the SVG namespace is declared again on an `svg`
/// root so the output stays a valid standalone SVG.
pub fn parse_lenient(input: &str) -> Result<Document> {
    match parse_document(input) {
        Ok(doc) => Ok(doc),
        Err(first) => {
            warn!("SVG parse failed ({}), retrying without default namespaces", first);
            let stripped = strip_default_namespaces(input)?;
            let mut doc = parse_document(&stripped).map_err(|second| {
                SvgError::malformed(format!("{}; after namespace fallback: {}", first, second))
            })?;
            redeclare_svg_namespace(&mut doc);
            Ok(doc)
        }
    }
}

/// Remove every `xmlns="..."` declaration from the markup.
pub fn strip_default_namespaces(input: &str) -> Result<String> {
    let re = Regex::new(DEFAULT_XMLNS_PATTERN)
        .map_err(|e| SvgError::malformed(format!("namespace pattern: {}", e)))?;
    Ok(re.replace_all(input, "").into_owned())
}

fn redeclare_svg_namespace(doc: &mut Document) {
    let Some(root) = doc.root_element() else {
        return;
    };
    if let Some(el) = doc.element_mut(root) {
        if el.local_name() == "svg" && el.prefix().is_none() && el.attr("xmlns").is_none() {
            debug!("re-declaring SVG namespace on root element");
            el.attributes.insert(
                0,
                crate::tree::Attribute {
                    name: "xmlns".to_string(),
                    value: SVG_NS.to_string(),
                },
            );
        }
    }
}

fn is_reserved_attribute(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:") || key.starts_with("xml:")
}

/// Named entities accepted in text and attribute values.
///
/// XML's five predefined entities plus the HTML ones that show up in
/// HTML-in-SVG text blocks.
fn resolve_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "apos" => "'",
        "quot" => "\"",
        "nbsp" => "\u{a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "zwsp" => "\u{200b}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        "middot" => "\u{b7}",
        "bull" => "\u{2022}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "yen" => "\u{a5}",
        "euro" => "\u{20ac}",
        "pound" => "\u{a3}",
        "larr" => "\u{2190}",
        "rarr" => "\u{2192}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",
        _ => return None,
    })
}
