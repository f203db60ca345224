//! Page layout for a single image
//!
//! Fits one image inside the margined page area: maximize size, preserve
//! aspect ratio, anchor top-left. No centering, no rotation, no cropping.

use crate::types::{ComposeError, Rect, Result};

/// Compute the placement rectangle for an image on a page.
///
/// `page_width` and `page_height` are the page dimensions in document units
/// (millimeters), `margin` the uniform margin on each side, and `ratio` the
/// image aspect ratio (width / height).
///
/// The image is widened to fill the available width; if the resulting height
/// overflows the available height, it is shrunk to fit height instead. The
/// rectangle is anchored at `(margin, margin)`.
pub fn fit_to_page(page_width: f32, page_height: f32, margin: f32, ratio: f32) -> Result<Rect> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(ComposeError::Layout(format!(
            "degenerate aspect ratio: {ratio}"
        )));
    }

    let avail_width = page_width - 2.0 * margin;
    let avail_height = page_height - 2.0 * margin;
    if avail_width <= 0.0 || avail_height <= 0.0 {
        return Err(ComposeError::Layout(format!(
            "margin {margin} leaves no printable area on a {page_width}x{page_height} page"
        )));
    }

    let mut width = avail_width;
    let mut height = width / ratio;
    if height > avail_height {
        height = avail_height;
        width = height * ratio;
    }

    Ok(Rect::new(margin, margin, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4: (f32, f32) = (210.0, 297.0);

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 0.01, "expected {b}, got {a}");
    }

    #[test]
    fn test_landscape_image_fills_width() {
        // 800x600 on A4 with 10mm margin: width-limited
        let rect = fit_to_page(A4.0, A4.1, 10.0, 800.0 / 600.0).unwrap();
        assert_close(rect.x, 10.0);
        assert_close(rect.y, 10.0);
        assert_close(rect.width, 190.0);
        assert_close(rect.height, 142.5);
    }

    #[test]
    fn test_portrait_image_still_fits_width() {
        // 600x800: height 253.33 still fits the 277mm available height
        let rect = fit_to_page(A4.0, A4.1, 10.0, 600.0 / 800.0).unwrap();
        assert_close(rect.width, 190.0);
        assert_close(rect.height, 253.333);
    }

    #[test]
    fn test_square_image() {
        let rect = fit_to_page(A4.0, A4.1, 10.0, 1.0).unwrap();
        assert_close(rect.width, 190.0);
        assert_close(rect.height, 190.0);
    }

    #[test]
    fn test_tall_image_is_height_limited() {
        // ratio 0.25: width-first fit would be 760mm tall, so fall back to
        // height-limited
        let rect = fit_to_page(A4.0, A4.1, 10.0, 0.25).unwrap();
        assert_close(rect.height, 277.0);
        assert_close(rect.width, 277.0 * 0.25);
        assert!(rect.right() <= A4.0 - 10.0 + 0.01);
    }

    #[test]
    fn test_tight_fit_and_ratio_preserved() {
        for &ratio in &[0.1, 0.5, 1.0, 1.5, 4.0, 10.0] {
            let rect = fit_to_page(A4.0, A4.1, 10.0, ratio).unwrap();
            let avail_w = 190.0;
            let avail_h = 277.0;
            assert!(rect.width <= avail_w + 0.001);
            assert!(rect.height <= avail_h + 0.001);
            // one dimension is tight
            assert!(
                (rect.width - avail_w).abs() < 0.001 || (rect.height - avail_h).abs() < 0.001,
                "fit not tight for ratio {ratio}"
            );
            assert!((rect.width / rect.height - ratio).abs() < ratio * 1e-4);
        }
    }

    #[test]
    fn test_degenerate_ratio_rejected() {
        assert!(matches!(
            fit_to_page(A4.0, A4.1, 10.0, 0.0),
            Err(ComposeError::Layout(_))
        ));
        assert!(matches!(
            fit_to_page(A4.0, A4.1, 10.0, -1.5),
            Err(ComposeError::Layout(_))
        ));
        assert!(matches!(
            fit_to_page(A4.0, A4.1, 10.0, f32::INFINITY),
            Err(ComposeError::Layout(_))
        ));
        assert!(matches!(
            fit_to_page(A4.0, A4.1, 10.0, f32::NAN),
            Err(ComposeError::Layout(_))
        ));
    }

    #[test]
    fn test_oversized_margin_rejected() {
        assert!(matches!(
            fit_to_page(210.0, 297.0, 110.0, 1.0),
            Err(ComposeError::Layout(_))
        ));
    }
}
