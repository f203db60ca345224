//! Bitmap resampling and JPEG re-encoding
//!
//! One quality knob drives both the pixel-width cap and the JPEG encode
//! quality. The cap only applies to low-quality selections and only shrinks;
//! images narrower than the cap are never upscaled.

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

use crate::constants::WIDTH_CAP_QUALITY_THRESHOLD;
use crate::types::{ComposeError, CompressedPage, Result};

/// Resample a bitmap and re-encode it as JPEG at the given quality.
///
/// `quality` must lie in (0, 1] and maps to JPEG quality `round(q * 100)`.
/// When `quality` is below 0.8 and the bitmap is wider than `width_cap`, the
/// bitmap is shrunk to `width_cap` pixels wide with height scaled by the same
/// ratio. The input bitmap is not mutated.
pub fn compress_bitmap(
    bitmap: &DynamicImage,
    quality: f32,
    width_cap: u32,
) -> Result<CompressedPage> {
    if !(quality > 0.0 && quality <= 1.0) {
        return Err(ComposeError::Config(format!(
            "quality must be in (0, 1], got {quality}"
        )));
    }
    if width_cap == 0 {
        return Err(ComposeError::Config("width cap must be positive".into()));
    }

    let (width, height) = (bitmap.width(), bitmap.height());
    if width == 0 || height == 0 {
        return Err(ComposeError::Compression(format!(
            "zero-area bitmap ({width}x{height})"
        )));
    }

    let (target_width, target_height) = target_dimensions(width, height, quality, width_cap);

    let rgb = if (target_width, target_height) == (width, height) {
        bitmap.to_rgb8()
    } else {
        bitmap
            .resize_exact(
                target_width,
                target_height,
                image::imageops::FilterType::Triangle,
            )
            .to_rgb8()
    };

    let mut buf = Vec::new();
    let jpeg_quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality);
    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ComposeError::Compression(e.to_string()))?;

    Ok(CompressedPage {
        data: buf,
        width: target_width,
        height: target_height,
    })
}

/// Working dimensions after the low-quality width cap.
fn target_dimensions(width: u32, height: u32, quality: f32, width_cap: u32) -> (u32, u32) {
    if quality >= WIDTH_CAP_QUALITY_THRESHOLD || width <= width_cap {
        return (width, height);
    }
    let scale = width_cap as f64 / width as f64;
    let target_height = ((height as f64 * scale).round() as u32).max(1);
    (width_cap, target_height)
}
