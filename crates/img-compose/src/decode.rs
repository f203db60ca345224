//! Decoding uploaded bytes into in-memory bitmaps

use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::types::{ComposeError, Result, SourceImage};

/// Decode a source image into a bitmap with positive dimensions.
///
/// The declared MIME type is used as a format hint when it names a known
/// format; if hinted decoding fails the content is sniffed instead, so a
/// mislabelled upload still decodes.
pub fn decode_bitmap(source: &SourceImage) -> Result<DynamicImage> {
    let hinted = source
        .mime
        .as_deref()
        .and_then(ImageFormat::from_mime_type);

    let bitmap = match hinted {
        Some(format) => image::load_from_memory_with_format(&source.bytes, format)
            .or_else(|_| image::load_from_memory(&source.bytes)),
        None => image::load_from_memory(&source.bytes),
    }
    .map_err(ComposeError::Decode)?;

    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(ComposeError::Decode(image::ImageError::Limits(
            image::error::LimitError::from_kind(image::error::LimitErrorKind::DimensionError),
        )));
    }

    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 90, 30]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let source = SourceImage::new("a.png", Some("image/png".into()), png_bytes(32, 16));
        let bitmap = decode_bitmap(&source).unwrap();
        assert_eq!(bitmap.dimensions(), (32, 16));
    }

    #[test]
    fn test_decode_with_wrong_mime_hint_falls_back() {
        // PNG content declared as JPEG still decodes via sniffing
        let source = SourceImage::new("a.jpg", Some("image/jpeg".into()), png_bytes(8, 8));
        let bitmap = decode_bitmap(&source).unwrap();
        assert_eq!(bitmap.dimensions(), (8, 8));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let source = SourceImage::new("junk.bin", None, vec![0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(
            decode_bitmap(&source),
            Err(ComposeError::Decode(_))
        ));
    }
}
