//! Font substitution table.
//!
//! Every source family collapses onto one of two glyph-complete CJK families.
//! Unknown families go to the sans family.

/// Sans-serif fallback family
pub const SANS_FAMILY: &str = "Noto Sans CJK SC";

/// Serif fallback family
pub const SERIF_FAMILY: &str = "Noto Serif CJK SC";

/// Ordered aliases, matched case-insensitively as substrings. `sans-serif`
/// must precede `serif`.
const ALIASES: &[(&str, &str)] = &[
    ("sans-serif", SANS_FAMILY),
    ("microsoft yahei", SANS_FAMILY),
    ("yahei", SANS_FAMILY),
    ("pingfang", SANS_FAMILY),
    ("hiragino sans", SANS_FAMILY),
    ("heiti", SANS_FAMILY),
    ("simhei", SANS_FAMILY),
    ("source han sans", SANS_FAMILY),
    ("noto sans", SANS_FAMILY),
    ("arial", SANS_FAMILY),
    ("helvetica", SANS_FAMILY),
    ("segoe ui", SANS_FAMILY),
    ("roboto", SANS_FAMILY),
    ("system-ui", SANS_FAMILY),
    ("songti", SERIF_FAMILY),
    ("simsun", SERIF_FAMILY),
    ("stsong", SERIF_FAMILY),
    ("fangsong", SERIF_FAMILY),
    ("kaiti", SERIF_FAMILY),
    ("source han serif", SERIF_FAMILY),
    ("noto serif", SERIF_FAMILY),
    ("times", SERIF_FAMILY),
    ("georgia", SERIF_FAMILY),
    ("serif", SERIF_FAMILY),
];

/// Map a CSS `font-family` value onto an output family.
pub fn map_font(family: &str) -> &'static str {
    let needle = family.to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| needle.contains(alias))
        .map(|(_, output)| *output)
        .unwrap_or(SANS_FAMILY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sans_serif_wins_over_serif() {
        assert_eq!(map_font("'Helvetica Neue', sans-serif"), SANS_FAMILY);
        assert_eq!(map_font("SANS-SERIF"), SANS_FAMILY);
    }

    #[test]
    fn test_serif_families() {
        assert_eq!(map_font("SimSun"), SERIF_FAMILY);
        assert_eq!(map_font("\"Times New Roman\", serif"), SERIF_FAMILY);
        assert_eq!(map_font("Georgia"), SERIF_FAMILY);
    }

    #[test]
    fn test_cjk_sans() {
        assert_eq!(map_font("Microsoft YaHei"), SANS_FAMILY);
        assert_eq!(map_font("PingFang SC, Hiragino Sans GB"), SANS_FAMILY);
    }

    #[test]
    fn test_unknown_falls_back_to_sans() {
        assert_eq!(map_font("Comic Sans MS"), SANS_FAMILY);
        assert_eq!(map_font(""), SANS_FAMILY);
    }
}
