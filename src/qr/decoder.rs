//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::png;
use image::{DynamicImage, GrayImage};

/// QR code decoder used to read generated or saved codes back
#[derive(Debug, Default, Clone, Copy)]
pub struct QrDecoder;

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self
    }

    /// Decode a QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<String> {
        self.decode_gray(&img.to_luma8())
    }

    /// Decode a QR code from PNG bytes
    pub fn decode_png(&self, bytes: &[u8]) -> Result<String> {
        let img = png::decode_png(bytes)?;
        self.decode(&img)
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: &GrayImage) -> Result<String> {
        let mut prepared = rqrr::PreparedImage::prepare(img.clone());

        let grids = prepared.detect_grids();
        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    version = ?meta.version,
                    ecc_level = meta.ecc_level,
                    length = content.len(),
                    "Decoded QR code"
                );
                Ok(content)
            }
            Err(e) => Err(Error::QrDecode(format!("{e:?}"))),
        }
    }
}
