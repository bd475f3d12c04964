//! Slide geometry: fitting a pixel canvas into a slide box.
//!
//! Source canvases are measured in CSS pixels (96 per inch). Slides are
//! measured in inches on the configuration side and in EMU inside the package.

use infodeck_ooxml::{inches_to_emu, DEFAULT_DPI};
use serde::{Deserialize, Serialize};

/// Result of fitting a source canvas into a target box
///
/// `offset_*` and `display_*` are in inches, relative to the target box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub display_w: f64,
    pub display_h: f64,
}

/// Fit `source_w x source_h` pixels into `target_w_in x target_h_in` inches at 96 DPI
pub fn fit_and_center(source_w: f64, source_h: f64, target_w_in: f64, target_h_in: f64) -> Fit {
    fit_and_center_at(source_w, source_h, target_w_in, target_h_in, DEFAULT_DPI)
}

/// Same as [`fit_and_center`] with an explicit pixel density
///
/// A zero, negative or non-finite source dimension cannot be scaled; the
/// asset then fills the target box with scale 1 and no offset.
pub fn fit_and_center_at(
    source_w: f64,
    source_h: f64,
    target_w_in: f64,
    target_h_in: f64,
    dpi: f64,
) -> Fit {
    let target_w = target_w_in.max(0.0);
    let target_h = target_h_in.max(0.0);

    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(source_w) || !usable(source_h) || !usable(dpi) {
        return Fit {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            display_w: target_w,
            display_h: target_h,
        };
    }

    let scale = (target_w * dpi / source_w).min(target_h * dpi / source_h);
    let display_w = source_w * scale / dpi;
    let display_h = source_h * scale / dpi;

    Fit {
        scale,
        offset_x: ((target_w - display_w) / 2.0).max(0.0),
        offset_y: ((target_h - display_h) / 2.0).max(0.0),
        display_w,
        display_h,
    }
}

/// Rectangle in EMU, as written to `a:off` / `a:ext`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmuRect {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl EmuRect {
    pub fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    /// Convert an inch rectangle
    pub fn from_inches(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x: inches_to_emu(x),
            y: inches_to_emu(y),
            cx: inches_to_emu(w),
            cy: inches_to_emu(h),
        }
    }

    pub fn right(&self) -> i64 {
        self.x + self.cx
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.cy
    }
}

/// Slide layout parameters, in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideGeometry {
    pub width_in: f64,
    pub height_in: f64,
    pub margin_in: f64,
    pub dpi: f64,
    /// Height reserved above the picture when a title is shown
    pub title_band_in: f64,
}

impl Default for SlideGeometry {
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 5.625,
            margin_in: 0.25,
            dpi: DEFAULT_DPI,
            title_band_in: 0.6,
        }
    }
}

/// Where the picture goes on the slide
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub fit: Fit,
    pub rect: EmuRect,
}

impl SlideGeometry {
    /// Geometry for a slide of the given EMU size with default margins
    pub fn from_emu(width_emu: i64, height_emu: i64) -> Self {
        Self {
            width_in: infodeck_ooxml::emu_to_inches(width_emu),
            height_in: infodeck_ooxml::emu_to_inches(height_emu),
            ..Self::default()
        }
    }

    pub fn with_margin(mut self, margin_in: f64) -> Self {
        self.margin_in = margin_in;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_title_band(mut self, title_band_in: f64) -> Self {
        self.title_band_in = title_band_in;
        self
    }

    /// Box available to the picture as `(x, y, w, h)` inches
    pub fn content_box(&self, with_title: bool) -> (f64, f64, f64, f64) {
        let band = if with_title { self.title_band_in.max(0.0) } else { 0.0 };
        let x = self.margin_in;
        let y = self.margin_in + band;
        let w = (self.width_in - 2.0 * self.margin_in).max(0.0);
        let h = (self.height_in - 2.0 * self.margin_in - band).max(0.0);
        (x, y, w, h)
    }

    /// Fit a `source_w x source_h` pixel canvas into the content box
    pub fn place(&self, source_w: f64, source_h: f64, with_title: bool) -> Placement {
        let (x, y, w, h) = self.content_box(with_title);
        let fit = fit_and_center_at(source_w, source_h, w, h, self.dpi);
        let rect = EmuRect::from_inches(
            x + fit.offset_x,
            y + fit.offset_y,
            fit.display_w,
            fit.display_h,
        );
        Placement { fit, rect }
    }

    /// Title band across the top margin
    pub fn title_rect(&self) -> EmuRect {
        EmuRect::from_inches(
            self.margin_in,
            self.margin_in,
            (self.width_in - 2.0 * self.margin_in).max(0.0),
            self.title_band_in.max(0.0),
        )
    }

    pub fn slide_emu(&self) -> (i64, i64) {
        (inches_to_emu(self.width_in), inches_to_emu(self.height_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_wide_canvas_fits_width() {
        let fit = fit_and_center(720.0, 243.0, 9.5, 5.125);
        assert!(close(fit.scale, 1.2667, 1e-3));
        assert!(close(fit.display_w, 9.5, 1e-9));
        assert!(close(fit.display_h, 3.21, 0.01));
        assert!(close(fit.offset_x, 0.0, 1e-9));
        assert!(close(fit.offset_y, 0.96, 0.01));
    }

    #[test]
    fn test_tall_canvas_fits_height() {
        let fit = fit_and_center(300.0, 900.0, 9.5, 5.125);
        assert!(close(fit.display_h, 5.125, 1e-9));
        assert!(fit.display_w < 9.5);
        assert!(fit.offset_x > 0.0);
        assert!(close(fit.offset_y, 0.0, 1e-9));
    }

    #[test]
    fn test_zero_source_fills_target() {
        let fit = fit_and_center(0.0, 243.0, 9.5, 5.125);
        assert_eq!(fit.scale, 1.0);
        assert_eq!((fit.offset_x, fit.offset_y), (0.0, 0.0));
        assert_eq!((fit.display_w, fit.display_h), (9.5, 5.125));

        let fit = fit_and_center(f64::NAN, 100.0, 4.0, 3.0);
        assert_eq!(fit.scale, 1.0);
        assert_eq!((fit.display_w, fit.display_h), (4.0, 3.0));
    }

    #[test]
    fn test_content_box_default_slide() {
        let geometry = SlideGeometry::default();
        let (x, y, w, h) = geometry.content_box(false);
        assert_eq!((x, y), (0.25, 0.25));
        assert!(close(w, 9.5, 1e-9));
        assert!(close(h, 5.125, 1e-9));

        let (_, y, _, h) = geometry.content_box(true);
        assert!(close(y, 0.85, 1e-9));
        assert!(close(h, 4.525, 1e-9));
    }

    #[test]
    fn test_place_converts_to_emu() {
        let placement = SlideGeometry::default().place(720.0, 243.0, false);
        assert_eq!(placement.rect.x, 228_600);
        assert_eq!(placement.rect.cx, 8_686_800);
        assert!(placement.rect.y > 228_600 + 800_000);
        assert!(placement.rect.bottom() <= 5_143_500 - 228_600 + 1);
    }

    #[test]
    fn test_title_rect() {
        let rect = SlideGeometry::default().title_rect();
        assert_eq!(rect, EmuRect::new(228_600, 228_600, 8_686_800, 548_640));
    }

    #[test]
    fn test_from_emu_round_trip() {
        let geometry = SlideGeometry::from_emu(9_144_000, 5_143_500);
        assert!(close(geometry.width_in, 10.0, 1e-9));
        assert!(close(geometry.height_in, 5.625, 1e-9));
        assert_eq!(geometry.slide_emu(), (9_144_000, 5_143_500));
    }
}
