//! In-memory OPC package
//!
//! A PPTX/DOCX file is a ZIP archive of XML parts and media. [`Package`] holds
//! every part as bytes keyed by its path; relationship and content-type indexes
//! are parsed from those parts on demand and checked by [`Package::validate`]
//! before anything is written.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::read::ZipArchive;
use zip::write::ZipWriter;
use zip::CompressionMethod;

use crate::content_types::{ContentTypes, CONTENT_TYPES_PATH};
use crate::error::{OoxmlError, Result};
use crate::relationships::Relationships;

/// Package-level relationships part
pub const PACKAGE_RELS_PATH: &str = "_rels/.rels";

/// An unpacked package
#[derive(Debug, Clone, Default)]
pub struct Package {
    /// All parts, keyed by path without leading slash
    parts: HashMap<String, Vec<u8>>,
}

impl Package {
    /// Create an empty package
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and unpack a package file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Unpack from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            parts.insert(name, contents);
        }

        debug!(parts = parts.len(), "unpacked package");
        Ok(Self { parts })
    }

    /// Get a part's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(|v| v.as_slice())
    }

    /// Get a part's contents as a string
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.parts
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Get a part that must exist
    pub fn require(&self, path: &str) -> Result<&[u8]> {
        self.get(path)
            .ok_or_else(|| OoxmlError::MissingPart(path.to_string()))
    }

    /// Check if a part exists
    pub fn contains(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    /// All part paths, sorted
    pub fn part_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.parts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Set or update a part's contents
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.parts.insert(path.into(), contents);
    }

    /// Set a part's contents from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.parts.insert(path.into(), contents.into().into_bytes());
    }

    /// Remove a part
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.parts.remove(path)
    }

    /// Parsed content type registry
    pub fn content_types(&self) -> Result<ContentTypes> {
        ContentTypes::parse(self.require(CONTENT_TYPES_PATH)?)
    }

    /// Replace the content type registry
    pub fn set_content_types(&mut self, types: &ContentTypes) {
        self.set_string(CONTENT_TYPES_PATH, types.to_xml());
    }

    /// Relationships of `source` ("" for the package itself); empty when the
    /// `.rels` part does not exist
    pub fn relationships(&self, source: &str) -> Result<Relationships> {
        match self.get(&rels_path_for(source)) {
            Some(bytes) => Relationships::parse(bytes),
            None => Ok(Relationships::new()),
        }
    }

    /// Write the relationships of `source`
    pub fn set_relationships(&mut self, source: &str, rels: &Relationships) {
        self.set_string(rels_path_for(source), rels.to_xml());
    }

    /// Check package invariants:
    /// - every internal relationship target resolves to a part
    /// - every part has a content type
    /// - relationship ids are unique within each `.rels` part
    pub fn validate(&self) -> Result<()> {
        let types = self.content_types()?;

        for name in self.part_names() {
            if name == CONTENT_TYPES_PATH {
                continue;
            }
            if types.content_type_for(name).is_none() {
                return Err(OoxmlError::integrity(format!(
                    "part {} has no content type",
                    name
                )));
            }

            let Some(source) = source_part_for(name) else {
                continue;
            };
            let rels = Relationships::parse(self.require(name)?)?;
            if let Some(dup) = rels.duplicate_ids().first() {
                return Err(OoxmlError::integrity(format!(
                    "duplicate relationship id {} in {}",
                    dup, name
                )));
            }
            for rel in rels.iter().filter(|r| !r.is_external()) {
                let resolved = resolve_target(&source, &rel.target);
                if !self.contains(&resolved) {
                    return Err(OoxmlError::integrity(format!(
                        "{} in {} points to missing part {}",
                        rel.id, name, resolved
                    )));
                }
            }
        }

        Ok(())
    }

    /// Write the package to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Write the package to any writer
    ///
    /// `[Content_Types].xml` goes first, the rest sorted by path.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated);

        let mut paths = self.part_names();
        paths.sort_by_key(|p| (*p != CONTENT_TYPES_PATH, *p));

        for path in paths {
            zip.start_file(path, options)?;
            zip.write_all(&self.parts[path])?;
        }

        zip.finish()?;
        Ok(())
    }
}

/// `.rels` part holding the relationships of `source`
///
/// `"ppt/slides/slide1.xml"` -> `"ppt/slides/_rels/slide1.xml.rels"`,
/// `""` -> `"_rels/.rels"`.
pub fn rels_path_for(source: &str) -> String {
    let source = source.trim_start_matches('/');
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", source),
    }
}

/// Source part of a `.rels` part, or `None` if `rels_path` is not one.
/// The package relationships map to `""`.
pub fn source_part_for(rels_path: &str) -> Option<String> {
    let stem = rels_path.strip_suffix(".rels")?;
    let (dir, file) = match stem.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => return None,
    };
    let parent = if dir == "_rels" {
        ""
    } else {
        dir.strip_suffix("/_rels")?
    };
    Some(if parent.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", parent, file)
    })
}

/// Resolve a relationship target against its source part
///
/// Absolute targets (leading `/`) are taken from the package root; relative
/// targets from the source part's directory, with `.` and `..` collapsed.
pub fn resolve_target(source: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let relative = match target.strip_prefix('/') {
        Some(abs) => abs,
        None => {
            if let Some((dir, _)) = source.rsplit_once('/') {
                segments.extend(dir.split('/').filter(|s| !s.is_empty()));
            }
            target
        }
    };
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Relative target from the directory of `source` to `part`
///
/// `("ppt/slides/slide1.xml", "ppt/media/image1.svg")` -> `"../media/image1.svg"`.
pub fn relative_target(source: &str, part: &str) -> String {
    let source_dir: Vec<&str> = source
        .rsplit_once('/')
        .map(|(dir, _)| dir.split('/').collect())
        .unwrap_or_default();
    let target: Vec<&str> = part.split('/').collect();

    let common = source_dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    let mut out: Vec<&str> = vec![".."; source_dir.len() - common];
    out.extend(&target[common..]);
    out.join("/")
}
