//! Properties of the canvas fit.

use infodeck_pptx::{fit_and_center, SlideGeometry};
use proptest::prelude::*;

proptest! {
    #[test]
    fn fit_stays_inside_target(
        sw in 1.0f64..5000.0,
        sh in 1.0f64..5000.0,
        tw in 0.5f64..20.0,
        th in 0.5f64..20.0,
    ) {
        let fit = fit_and_center(sw, sh, tw, th);
        prop_assert!(fit.offset_x >= 0.0);
        prop_assert!(fit.offset_y >= 0.0);
        prop_assert!(fit.display_w <= tw + 1e-9);
        prop_assert!(fit.display_h <= th + 1e-9);
        prop_assert!((fit.offset_x * 2.0 + fit.display_w - tw).abs() < 1e-9);
        prop_assert!((fit.offset_y * 2.0 + fit.display_h - th).abs() < 1e-9);
    }

    #[test]
    fn fit_preserves_aspect_ratio(sw in 1.0f64..5000.0, sh in 1.0f64..5000.0) {
        let fit = fit_and_center(sw, sh, 9.5, 5.125);
        let source = sw / sh;
        let shown = fit.display_w / fit.display_h;
        prop_assert!((source - shown).abs() / source < 1e-9);
    }

    #[test]
    fn placement_stays_on_slide(sw in 1.0f64..5000.0, sh in 1.0f64..5000.0, titled: bool) {
        let geometry = SlideGeometry::default();
        let (slide_w, slide_h) = geometry.slide_emu();
        let rect = geometry.place(sw, sh, titled).rect;
        prop_assert!(rect.x >= 0 && rect.y >= 0);
        prop_assert!(rect.right() <= slide_w);
        prop_assert!(rect.bottom() <= slide_h);
    }
}
