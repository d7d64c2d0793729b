//! PNG encoding for export.
//!
//! Export output is always PNG: lossless, universally supported, and the
//! format the download surface expects. The data-URI helper wraps the
//! encoded bytes for anchors that want an inline `href`.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

/// Error types for encoding operations.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel buffer length does not match the stated dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Zero-sized dimensions cannot be encoded.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed.
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data as PNG.
///
/// # Errors
///
/// Returns an error if dimensions are zero, the buffer length does not
/// match `width * height * 3`, or the encoder itself fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Wrap PNG bytes in a `data:image/png;base64,` URI.
pub fn to_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_produces_valid_signature() {
        let pixels = vec![200u8; 8 * 4 * 3];
        let png = encode_png(&pixels, 8, 4).unwrap();

        // PNG magic bytes.
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_decodes_back() {
        let mut pixels = Vec::new();
        for i in 0..(6 * 3 * 3) {
            pixels.push((i * 7 % 256) as u8);
        }
        let png = encode_png(&pixels, 6, 3).unwrap();
        let decoded = crate::decode::decode_image(&png).unwrap();

        assert_eq!(decoded.width, 6);
        assert_eq!(decoded.height, 3);
        assert_eq!(decoded.pixels, pixels);
    }

    #[test]
    fn test_encode_zero_dimensions_fails() {
        let result = encode_png(&[], 0, 10);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_encode_wrong_buffer_length_fails() {
        let pixels = vec![0u8; 10];
        let result = encode_png(&pixels, 4, 4);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 48,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_data_uri_prefix() {
        let pixels = vec![0u8; 2 * 2 * 3];
        let png = encode_png(&pixels, 2, 2).unwrap();
        let uri = to_data_uri(&png);

        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.len() > 22);
    }

    #[test]
    fn test_data_uri_is_base64() {
        let uri = to_data_uri(&[1, 2, 3]);
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), vec![1, 2, 3]);
    }
}
