//! Presentation compatibility report.
//!
//! Presentation software drops `foreignObject` content and does not know HTML
//! elements, so a document is compatible only when it carries its text as
//! native `<text>` elements and nothing else.

use serde::Serialize;

use crate::tree::Document;

/// Where a text sample was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// Native `<text>` element
    Text,
    /// `<span>` inside a `<foreignObject>`
    ForeignSpan,
}

/// One non-empty text sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSample {
    pub source: TextSource,
    pub text: String,
}

/// Element counts, findings and extracted text for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityReport {
    pub foreign_objects: usize,
    pub spans: usize,
    pub text_elements: usize,
    pub compatible: bool,
    pub issues: Vec<String>,
    pub samples: Vec<TextSample>,
}

/// Inspect a parsed document.
pub fn compatibility_report(doc: &Document) -> CompatibilityReport {
    let foreign = doc.find_by_local_name("foreignObject");
    let spans = doc.count_local_name("span");
    let texts = doc.find_by_local_name("text");

    let mut samples = Vec::new();
    let mut text_elements = 0;
    for &id in &texts {
        let content = doc.text_content(id);
        let content = content.trim();
        if !content.is_empty() {
            text_elements += 1;
            samples.push(TextSample {
                source: TextSource::Text,
                text: content.to_string(),
            });
        }
    }
    for &container in &foreign {
        for span in doc
            .descendants(container)
            .into_iter()
            .filter(|&id| doc.element(id).is_some_and(|e| e.local_name() == "span"))
        {
            let content = doc.text_content(span);
            let content = content.trim();
            if !content.is_empty() {
                samples.push(TextSample {
                    source: TextSource::ForeignSpan,
                    text: content.to_string(),
                });
            }
        }
    }

    let mut issues = Vec::new();
    if !foreign.is_empty() {
        issues.push(format!(
            "{} <foreignObject> element(s): text inside them will not display",
            foreign.len()
        ));
    }
    if spans > 0 {
        issues.push(format!("{} HTML <span> element(s)", spans));
    }
    if text_elements == 0 {
        issues.push("no <text> elements with content".to_string());
    }

    CompatibilityReport {
        foreign_objects: foreign.len(),
        spans,
        text_elements,
        compatible: issues.is_empty(),
        issues,
        samples,
    }
}
