//! In-memory PNG encoding of rendered QR codes

use crate::error::Result;
use bytes::Bytes;
use image::{DynamicImage, GrayImage, ImageFormat};
use std::io::Cursor;

/// The eight-byte PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Encode a grayscale image as a complete PNG buffer.
pub fn encode_png(image: &GrayImage) -> Result<Bytes> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(Bytes::from(buffer.into_inner()))
}

/// Decode PNG bytes back into an image.
pub fn decode_png(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?)
}

/// Whether `bytes` starts with the PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}
