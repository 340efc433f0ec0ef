//! AVIF encoding
//!
//! Decodes any format the `image` crate understands and re-encodes to AVIF
//! with `ravif`. The caller-facing "compression percentage" is inverted into
//! the codec's quality scale: more compression means lower quality and a
//! smaller, lossier file.

use bytes::Bytes;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Failed to decode source image: {0}")]
    Decode(String),

    #[error("AVIF encode failed: {0}")]
    Encode(String),
}

/// Translate a compression percentage (0-100) into the codec's quality scale.
/// The mapping is `100 - pct`, monotonically decreasing in `pct`.
pub fn codec_quality(compression_pct: i64) -> f32 {
    (100 - compression_pct) as f32
}

/// Encode `data` (any decodable raster format) to AVIF at the given codec
/// quality. `lossless` pins quality to the top of the scale; the encoder has
/// no dedicated lossless mode.
///
/// Fully in-memory and CPU-bound; run it inside `spawn_blocking`.
pub fn encode_avif(data: &[u8], quality: f32, lossless: bool) -> Result<Bytes, EncodeError> {
    let img = image::load_from_memory(data).map_err(|e| EncodeError::Decode(e.to_string()))?;

    let rgb_img = img.to_rgb8();
    let (width, height) = rgb_img.dimensions();
    let raw_pixels = rgb_img.as_raw();

    let rgb_data: Vec<rgb::RGB8> = raw_pixels
        .chunks_exact(3)
        .map(|chunk| rgb::RGB8::new(chunk[0], chunk[1], chunk[2]))
        .collect();

    let img_buf = ravif::Img::new(rgb_data.as_slice(), width as usize, height as usize);

    let effective_quality = if lossless {
        100.0
    } else {
        // ravif accepts 1-100
        quality.clamp(1.0, 100.0)
    };

    let encoder = ravif::Encoder::new()
        .with_quality(effective_quality)
        .with_speed(6); // Balance between speed and compression

    let avif_data = encoder
        .encode_rgb(img_buf)
        .map_err(|e| EncodeError::Encode(e.to_string()))?;

    tracing::debug!(
        width,
        height,
        quality = effective_quality,
        lossless,
        output_bytes = avif_data.avif_file.len(),
        "Encoded AVIF"
    );

    Ok(Bytes::copy_from_slice(&avif_data.avif_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let mut img = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                // smooth gradient so the encoder has realistic content
                img.put_pixel(x, y, Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
            }
        }
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_codec_quality_inverts_percentage() {
        assert_eq!(codec_quality(0), 100.0);
        assert_eq!(codec_quality(30), 70.0);
        assert_eq!(codec_quality(100), 0.0);
    }

    #[test]
    fn test_codec_quality_monotonically_decreasing() {
        for pct in 0..100 {
            assert!(codec_quality(pct) > codec_quality(pct + 1));
        }
    }

    #[test]
    fn test_encode_produces_valid_avif() {
        let png = png_fixture(64, 64);
        // compression 0 -> codec quality 100
        let avif = encode_avif(&png, codec_quality(0), false).unwrap();

        assert!(!avif.is_empty());
        // ISO BMFF ftyp box with the avif brand
        assert_eq!(&avif[4..8], b"ftyp");
        assert_eq!(&avif[8..12], b"avif");
    }

    #[test]
    fn test_higher_compression_is_not_larger() {
        let png = png_fixture(128, 128);
        let light = encode_avif(&png, codec_quality(10), false).unwrap();
        let heavy = encode_avif(&png, codec_quality(90), false).unwrap();
        assert!(heavy.len() <= light.len());
    }

    #[test]
    fn test_lossless_flag_encodes() {
        let png = png_fixture(16, 16);
        let avif = encode_avif(&png, codec_quality(50), true).unwrap();
        assert!(!avif.is_empty());
    }

    #[test]
    fn test_undecodable_input_is_decode_error() {
        let result = encode_avif(b"definitely not an image", 80.0, false);
        assert!(matches!(result, Err(EncodeError::Decode(_))));
    }
}
