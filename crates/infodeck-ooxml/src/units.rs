//! Length units and media types
//!
//! OOXML measures geometry in EMUs (English Metric Units):
//! - 914400 EMUs = 1 inch
//! - 9525 EMUs = 1 pixel (at 96 DPI)

/// EMUs per inch (914400)
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per pixel at 96 DPI (9525)
pub const EMU_PER_PIXEL: i64 = 9_525;

/// EMUs per typographic point (12700)
pub const EMU_PER_POINT: i64 = 12_700;

/// Reference resolution for pixel lengths
pub const DEFAULT_DPI: f64 = 96.0;

/// Convert inches to EMUs, rounding to the nearest unit
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

/// Convert pixels (96 DPI) to EMUs
pub fn pixels_to_emu(pixels: f64) -> i64 {
    (pixels * EMU_PER_PIXEL as f64).round() as i64
}

/// Convert EMUs to pixels (96 DPI)
pub fn emu_to_pixels(emu: i64) -> f64 {
    emu as f64 / EMU_PER_PIXEL as f64
}

pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMU_PER_INCH as f64
}

/// Media type for a file extension
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        "tiff" | "tif" => "image/tiff",
        "bmp" => "image/bmp",
        "xml" => "application/xml",
        "rels" => "application/vnd.openxmlformats-package.relationships+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_and_pixel_agree() {
        assert_eq!(inches_to_emu(1.0), EMU_PER_INCH);
        assert_eq!(pixels_to_emu(96.0), EMU_PER_INCH);
        assert_eq!(emu_to_pixels(EMU_PER_INCH), 96.0);
        assert_eq!(emu_to_inches(inches_to_emu(5.625)), 5.625);
    }

    #[test]
    fn test_slide_width() {
        assert_eq!(inches_to_emu(10.0), 9_144_000);
        assert_eq!(inches_to_emu(5.625), 5_143_500);
    }

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(content_type_for_extension("SVG"), "image/svg+xml");
        assert_eq!(content_type_for_extension("jpeg"), "image/jpeg");
        assert_eq!(content_type_for_extension("xyz"), "application/octet-stream");
    }
}
