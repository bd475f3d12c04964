//! Relationship parts (`_rels/*.rels`)
//!
//! Each part's outgoing references live in a sibling `.rels` part that maps an
//! id to a target and a relationship type.
//!
//! # Example
//!
//! ```
//! use infodeck_ooxml::Relationships;
//!
//! let mut rels = Relationships::new();
//! let id = rels.add("../media/image1.svg", Relationships::TYPE_IMAGE);
//! assert_eq!(id, "rId1");
//! assert!(rels.to_xml().contains(r#"Target="../media/image1.svg""#));
//! ```

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// OPC namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// A single relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Id, unique within its `.rels` part (e.g. "rId3")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path, relative to the source part's directory, or a URL
    pub target: String,
    /// "External" for targets outside the package
    pub target_mode: Option<String>,
}

impl Relationship {
    pub fn is_external(&self) -> bool {
        self.target_mode
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("external"))
    }
}

/// Parsed relationships of one `.rels` part, in document order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

/// Common relationship type URIs
impl Relationships {
    /// Office document (package root to main part)
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Image relationship type
    pub const TYPE_IMAGE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    /// Slide relationship type
    pub const TYPE_SLIDE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    /// Slide layout relationship type
    pub const TYPE_SLIDE_LAYOUT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    /// Slide master relationship type
    pub const TYPE_SLIDE_MASTER: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    /// Theme relationship type
    pub const TYPE_THEME: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    /// Core properties relationship type
    pub const TYPE_CORE_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    /// Extended properties relationship type
    pub const TYPE_EXTENDED_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    /// Presentation properties relationship type
    pub const TYPE_PRES_PROPS: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
    /// View properties relationship type
    pub const TYPE_VIEW_PROPS: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
    /// Table styles relationship type
    pub const TYPE_TABLE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";
}

impl Relationships {
    /// Create an empty relationship set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse relationships from XML bytes
    ///
    /// Duplicate ids are kept so that [`Relationships::duplicate_ids`] can
    /// report them.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut id = None;
                        let mut target = None;
                        let mut rel_type = None;
                        let mut target_mode = None;

                        for attr in e.attributes() {
                            let attr = attr?;
                            let value = attr.unescape_value()?.into_owned();
                            match attr.key.as_ref() {
                                b"Id" => id = Some(value),
                                b"Target" => target = Some(value),
                                b"Type" => rel_type = Some(value),
                                b"TargetMode" => target_mode = Some(value),
                                _ => {}
                            }
                        }

                        match (id, target) {
                            (Some(id), Some(target)) => entries.push(Relationship {
                                id,
                                rel_type: rel_type.unwrap_or_default(),
                                target,
                                target_mode,
                            }),
                            _ => {
                                return Err(OoxmlError::InvalidStructure(
                                    "Relationship without Id or Target".to_string(),
                                ))
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { entries })
    }

    /// Next free id: one past the highest numeric `rIdN` in use.
    pub fn next_id(&self) -> String {
        let max = self
            .entries
            .iter()
            .filter_map(|r| extract_id_number(&r.id))
            .max()
            .unwrap_or(0);
        format!("rId{}", max + 1)
    }

    /// Add an internal relationship and return the generated id
    pub fn add(&mut self, target: impl Into<String>, rel_type: impl Into<String>) -> String {
        self.add_with_mode(target, rel_type, None)
    }

    /// Add a relationship with explicit target mode
    pub fn add_with_mode(
        &mut self,
        target: impl Into<String>,
        rel_type: impl Into<String>,
        target_mode: Option<String>,
    ) -> String {
        let id = self.next_id();
        self.entries.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.into(),
            target: target.into(),
            target_mode,
        });
        id
    }

    /// Insert a relationship with a caller-chosen id
    ///
    /// Fails with [`OoxmlError::Integrity`] when the id is already taken.
    pub fn insert(&mut self, relationship: Relationship) -> Result<()> {
        if self.contains(&relationship.id) {
            return Err(OoxmlError::integrity(format!(
                "relationship id {} already exists",
                relationship.id
            )));
        }
        self.entries.push(relationship);
        Ok(())
    }

    /// Serialize to a `.rels` part
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));

        for rel in &self.entries {
            xml.push_str("<Relationship");
            xml.push_str(&format!(r#" Id="{}""#, escape_xml(&rel.id)));
            xml.push_str(&format!(r#" Type="{}""#, escape_xml(&rel.rel_type)));
            xml.push_str(&format!(r#" Target="{}""#, escape_xml(&rel.target)));
            if let Some(mode) = &rel.target_mode {
                xml.push_str(&format!(r#" TargetMode="{}""#, escape_xml(mode)));
            }
            xml.push_str("/>");
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Target for a relationship id
    pub fn get(&self, id: &str) -> Option<&str> {
        self.get_relationship(id).map(|r| r.target.as_str())
    }

    pub fn get_relationship(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|r| r.id == id)
    }

    /// First relationship of a given type, in document order
    pub fn first_of_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.rel_type == rel_type)
    }

    pub fn is_image(&self, id: &str) -> bool {
        self.get_relationship(id)
            .is_some_and(|r| r.rel_type == Self::TYPE_IMAGE)
    }

    /// Ids used more than once
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dups = Vec::new();
        for rel in &self.entries {
            if !seen.insert(rel.id.as_str()) && !dups.contains(&rel.id.as_str()) {
                dups.push(rel.id.as_str());
            }
        }
        dups
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in document order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }
}

/// Extract the numeric portion from a relationship id (e.g. "rId5" -> 5)
fn extract_id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId")
        .or_else(|| id.strip_prefix("RId"))
        .or_else(|| id.strip_prefix("rid"))
        .and_then(|num_str| num_str.parse().ok())
}

/// Escape special XML characters in attribute values
pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
