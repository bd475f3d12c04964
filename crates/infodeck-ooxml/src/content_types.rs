//! `[Content_Types].xml` registry.
//!
//! A part's media type comes from an `Override` for its exact part name, or
//! else from a `Default` for its extension. Both lookups are ASCII
//! case-insensitive, as OPC part names are.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::relationships::escape_xml;

/// Path of the registry part inside a package
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

/// OPC namespace for content types
pub const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultType {
    pub extension: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideType {
    /// Part name with leading slash (e.g. "/ppt/slides/slide1.xml")
    pub part_name: String,
    pub content_type: String,
}

/// Parsed content type registry
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    defaults: Vec<DefaultType>,
    overrides: Vec<OverrideType>,
}

impl ContentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `[Content_Types].xml`
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut types = Self::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let local = e.local_name();
                    let is_default = local.as_ref() == b"Default";
                    let is_override = local.as_ref() == b"Override";
                    if is_default || is_override {
                        let mut key = None;
                        let mut content_type = None;
                        for attr in e.attributes() {
                            let attr = attr?;
                            let value = attr.unescape_value()?.into_owned();
                            match attr.key.as_ref() {
                                b"Extension" | b"PartName" => key = Some(value),
                                b"ContentType" => content_type = Some(value),
                                _ => {}
                            }
                        }
                        let (Some(key), Some(content_type)) = (key, content_type) else {
                            return Err(OoxmlError::InvalidStructure(
                                "content type entry without key or ContentType".to_string(),
                            ));
                        };
                        if is_default {
                            types.defaults.push(DefaultType {
                                extension: key,
                                content_type,
                            });
                        } else {
                            types.overrides.push(OverrideType {
                                part_name: key,
                                content_type,
                            });
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(types)
    }

    /// Serialize back to XML, defaults first
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, CONTENT_TYPES_NS));
        for d in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(&d.extension),
                escape_xml(&d.content_type)
            ));
        }
        for o in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(&o.part_name),
                escape_xml(&o.content_type)
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    /// Content type for a package path (with or without leading slash)
    pub fn content_type_for(&self, path: &str) -> Option<&str> {
        self.override_for(path).or_else(|| {
            let ext = extension_of(path)?;
            self.default_for(ext)
        })
    }

    pub fn override_for(&self, path: &str) -> Option<&str> {
        let part_name = to_part_name(path);
        self.overrides
            .iter()
            .find(|o| o.part_name.eq_ignore_ascii_case(&part_name))
            .map(|o| o.content_type.as_str())
    }

    pub fn default_for(&self, extension: &str) -> Option<&str> {
        self.defaults
            .iter()
            .find(|d| d.extension.eq_ignore_ascii_case(extension))
            .map(|d| d.content_type.as_str())
    }

    /// Register a default for `extension` unless one exists.
    ///
    /// Returns `true` when an entry was added.
    pub fn ensure_default(&mut self, extension: &str, content_type: &str) -> bool {
        if self.default_for(extension).is_some() {
            return false;
        }
        self.defaults.push(DefaultType {
            extension: extension.to_ascii_lowercase(),
            content_type: content_type.to_string(),
        });
        true
    }

    /// Register (or replace) an override for an exact part
    pub fn set_override(&mut self, path: &str, content_type: &str) {
        let part_name = to_part_name(path);
        match self
            .overrides
            .iter_mut()
            .find(|o| o.part_name.eq_ignore_ascii_case(&part_name))
        {
            Some(existing) => existing.content_type = content_type.to_string(),
            None => self.overrides.push(OverrideType {
                part_name,
                content_type: content_type.to_string(),
            }),
        }
    }

    pub fn defaults(&self) -> &[DefaultType] {
        &self.defaults
    }

    pub fn overrides(&self) -> &[OverrideType] {
        &self.overrides
    }
}

fn to_part_name(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn extension_of(path: &str) -> Option<&str> {
    let file = path.rsplit('/').next()?;
    file.rsplit_once('.').map(|(_, ext)| ext).filter(|e| !e.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="XML" ContentType="application/xml"/>
  <Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
</Types>"#;

    #[test]
    fn test_lookup_prefers_override() {
        let types = ContentTypes::parse(TYPES).unwrap();
        assert_eq!(
            types.content_type_for("ppt/slides/slide1.xml"),
            Some("application/vnd.openxmlformats-officedocument.presentationml.slide+xml")
        );
        assert_eq!(types.content_type_for("ppt/other.xml"), Some("application/xml"));
        assert_eq!(types.content_type_for("ppt/media/image1.png"), None);
        assert_eq!(types.content_type_for("noextension"), None);
    }

    #[test]
    fn test_ensure_default_is_case_insensitive() {
        let mut types = ContentTypes::parse(TYPES).unwrap();
        assert!(!types.ensure_default("xml", "text/xml"));
        assert!(types.ensure_default("SVG", "image/svg+xml"));
        assert!(!types.ensure_default("svg", "image/svg+xml"));
        assert_eq!(types.defaults().len(), 3);
        assert_eq!(types.content_type_for("ppt/media/image1.svg"), Some("image/svg+xml"));
    }

    #[test]
    fn test_roundtrip() {
        let mut types = ContentTypes::parse(TYPES).unwrap();
        types.set_override("ppt/presentation.xml", "application/p+xml");
        let reparsed = ContentTypes::parse(types.to_xml().as_bytes()).unwrap();
        assert_eq!(reparsed.defaults().len(), 2);
        assert_eq!(reparsed.overrides().len(), 2);
        assert_eq!(reparsed.override_for("/ppt/presentation.xml"), Some("application/p+xml"));
    }
}
