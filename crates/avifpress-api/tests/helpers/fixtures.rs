use std::io::Cursor;

use image::{DynamicImage, Rgb, RgbImage};

/// Generate a textured JPEG so the input has a realistic size for the
/// compression assertions.
pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = ((x ^ y) & 0xFF) as u8;
            img.put_pixel(x, y, Rgb([r, g, b]));
        }
    }
    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, 90);
    DynamicImage::ImageRgb8(img).write_with_encoder(encoder).unwrap();
    buffer
}
