//! Inline CSS declaration parsing and typed value extraction.

use std::collections::HashMap;

/// Font size used when a declaration has no usable number.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Fill used when a block declares no color.
pub const DEFAULT_FILL: &str = "#000000";

/// CSS property name (lower-cased) to raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: HashMap<String, String>,
}

impl StyleMap {
    /// Parse a `style` attribute value.
    ///
    /// Segments without a `:` are skipped. Later duplicates win.
    pub fn resolve(style: &str) -> Self {
        let entries = style
            .split(';')
            .filter_map(|segment| segment.split_once(':'))
            .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Font size in pixels, defaulting to [`DEFAULT_FONT_SIZE`].
    pub fn font_size(&self) -> f64 {
        self.get("font-size")
            .map(extract_number)
            .unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Fill as hex, defaulting to [`DEFAULT_FILL`].
    pub fn fill(&self) -> String {
        self.get("color")
            .map(color_to_hex)
            .unwrap_or_else(|| DEFAULT_FILL.to_string())
    }

    pub fn is_bold(&self) -> bool {
        self.get("font-weight").is_some_and(is_bold_weight)
    }

    /// Horizontal alignment keyword, first of `text-align`, `justify-content`,
    /// then the justify half of `place-content`.
    pub fn horizontal_alignment(&self) -> Option<&str> {
        self.get("text-align")
            .or_else(|| self.get("justify-content"))
            .or_else(|| {
                self.get("place-content").map(|value| {
                    let mut parts = value.split_whitespace();
                    let first = parts.next().unwrap_or("");
                    parts.next().unwrap_or(first)
                })
            })
    }

    /// Vertical alignment keyword from `align-items`.
    pub fn vertical_alignment(&self) -> Option<&str> {
        self.get("align-items")
    }
}

/// First run of digits and decimal points, or [`DEFAULT_FONT_SIZE`] when
/// there is none or it does not fit a finite `f64`.
pub fn extract_number(value: &str) -> f64 {
    let start = match value.find(|c: char| c.is_ascii_digit() || c == '.') {
        Some(i) => i,
        None => return DEFAULT_FONT_SIZE,
    };
    let run: String = value[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    run.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(DEFAULT_FONT_SIZE)
}

/// Normalize `rgb()`/`rgba()` to `#rrggbb`; anything else passes through.
pub fn color_to_hex(value: &str) -> String {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    let inner = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'));

    let Some(inner) = inner else {
        return trimmed.to_string();
    };

    let channels: Vec<u8> = inner
        .split(',')
        .take(3)
        .filter_map(|c| c.trim().parse::<f64>().ok())
        .map(|c| c.round().clamp(0.0, 255.0) as u8)
        .collect();

    match channels.as_slice() {
        [r, g, b] => format!("#{:02x}{:02x}{:02x}", r, g, b),
        _ => trimmed.to_string(),
    }
}

/// `bold`/`bolder` or a numeric weight of at least 700.
pub fn is_bold_weight(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "bold" | "bolder" => true,
        other => other.parse::<f64>().is_ok_and(|w| w >= 700.0),
    }
}
