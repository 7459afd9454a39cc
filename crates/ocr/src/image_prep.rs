//! Image preparation ahead of text recognition.

use image::{DynamicImage, ImageOutputFormat};
use notebook_core::{Error, Result};
use std::io::Cursor;

/// Decode an uploaded image and re-encode it as grayscale PNG.
///
/// Accepts any format the `image` crate can decode (PNG, JPEG, GIF, BMP,
/// TIFF, WebP). Leptonica reads PNG everywhere, whatever it was built with.
pub fn prepare_image(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| Error::ImageError(format!("Failed to decode image: {}", e)))?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(Error::ImageError(format!(
            "Image dimensions must be non-zero (got {}x{})",
            width, height
        )));
    }

    let gray = DynamicImage::ImageLuma8(decoded.to_luma8());

    let mut png = Cursor::new(Vec::new());
    gray.write_to(&mut png, ImageOutputFormat::Png)
        .map_err(|e| Error::ImageError(format!("Failed to encode image to PNG: {}", e)))?;

    log::debug!("Prepared {}x{} image for OCR", width, height);

    Ok(png.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn encode(img: DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_prepare_png_becomes_grayscale_png() {
        let img = RgbImage::from_pixel(8, 4, Rgb([200, 40, 40]));
        let bytes = encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::Png);

        let prepared = prepare_image(&bytes).unwrap();
        assert!(prepared.starts_with(&[0x89, b'P', b'N', b'G']));

        let decoded = image::load_from_memory(&prepared).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
        assert!(matches!(decoded, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn test_prepare_jpeg() {
        let img = RgbImage::from_pixel(16, 16, Rgb([10, 10, 10]));
        let bytes = encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::Jpeg(90));

        let prepared = prepare_image(&bytes).unwrap();
        assert!(prepared.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_prepare_rejects_garbage() {
        assert!(matches!(
            prepare_image(b"not an image at all"),
            Err(Error::ImageError(_))
        ));
    }
}
