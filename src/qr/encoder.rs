//! Built-in QR encoder

use crate::error::{Error, Result};
use crate::qr::{EcLevel, QrEncoder};
use image::GrayImage;

/// Light border drawn on each side when the quiet zone is on (modules)
#[cfg(feature = "render")]
const QUIET_ZONE_MODULES: u32 = 4;

/// Largest rendered image side accepted, in pixels
pub const MAX_IMAGE_SIDE: u32 = 8_192;

/// QR encoder backed by the `qrcode` crate
///
/// When the crate is built without the `render` feature this type still
/// exists but every call reports [`Error::UnsupportedPlatform`].
#[derive(Debug, Clone, Copy)]
pub struct QrCodeEncoder {
    /// Surround the symbol with the standard 4-module light border
    quiet_zone: bool,
}

impl QrCodeEncoder {
    /// Create an encoder that draws the quiet zone
    pub fn new() -> Self {
        Self { quiet_zone: true }
    }

    /// Create an encoder with an explicit quiet-zone setting
    pub fn with_quiet_zone(quiet_zone: bool) -> Self {
        Self { quiet_zone }
    }

    /// Whether the rendered image includes the quiet zone
    pub fn quiet_zone(&self) -> bool {
        self.quiet_zone
    }
}

impl Default for QrCodeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "render")]
impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

#[cfg(feature = "render")]
impl QrEncoder for QrCodeEncoder {
    fn encode(&self, text: &str, ec_level: EcLevel, scale: u32) -> Result<GrayImage> {
        use image::Luma;
        use qrcode::QrCode;

        if scale == 0 {
            return Err(Error::Generation(
                "module scale must be at least 1 pixel".to_string(),
            ));
        }

        let code = QrCode::with_error_correction_level(text.as_bytes(), ec_level.into())
            .map_err(|e| Error::Generation(e.to_string()))?;

        let border = if self.quiet_zone {
            2 * QUIET_ZONE_MODULES
        } else {
            0
        };
        let side = u32::try_from(code.width())
            .ok()
            .and_then(|modules| modules.checked_add(border))
            .and_then(|modules| modules.checked_mul(scale))
            .filter(|side| *side <= MAX_IMAGE_SIDE)
            .ok_or_else(|| {
                Error::Generation(format!(
                    "{scale} px per module makes the image wider than {MAX_IMAGE_SIDE} px"
                ))
            })?;

        tracing::trace!(
            version = ?code.version(),
            modules = code.width(),
            side,
            ec_level = %ec_level,
            "Encoded QR symbol"
        );

        Ok(code
            .render::<Luma<u8>>()
            .module_dimensions(scale, scale)
            .quiet_zone(self.quiet_zone)
            .build())
    }
}

#[cfg(not(feature = "render"))]
impl QrEncoder for QrCodeEncoder {
    fn encode(&self, _text: &str, _ec_level: EcLevel, _scale: u32) -> Result<GrayImage> {
        Err(Error::UnsupportedPlatform)
    }
}

#[cfg(all(test, feature = "render"))]
mod tests {
    use super::*;

    #[test]
    fn renders_whole_modules_at_scale() {
        let encoder = QrCodeEncoder::new();
        let image = encoder.encode("Hello", EcLevel::Q, 20).unwrap();

        // Version 1 is 21 modules wide plus 4 quiet modules per side.
        assert_eq!(image.width(), (21 + 8) * 20);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn omits_quiet_zone_when_asked() {
        let encoder = QrCodeEncoder::with_quiet_zone(false);
        let image = encoder.encode("Hello", EcLevel::Q, 3).unwrap();
        assert_eq!(image.width(), 21 * 3);
        // Top-left pixel sits inside a finder pattern.
        assert_eq!(image.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn rejects_zero_scale() {
        let encoder = QrCodeEncoder::new();
        let err = encoder.encode("Hello", EcLevel::Q, 0).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn rejects_scale_that_overflows_image_size() {
        let encoder = QrCodeEncoder::new();
        let err = encoder.encode("Hello", EcLevel::Q, 200_000_000).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));

        let err = encoder.encode("Hello", EcLevel::Q, 100_000).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn quiet_zone_counts_towards_image_limit() {
        // 21 modules fit at this scale, 29 do not.
        let scale = MAX_IMAGE_SIDE / 28;
        let err = QrCodeEncoder::new()
            .encode("Hello", EcLevel::Q, scale)
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn reports_oversized_payload() {
        let encoder = QrCodeEncoder::new();
        let text = "x".repeat(5000);
        let err = encoder.encode(&text, EcLevel::Q, 1).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn round_trip() {
        use crate::qr::QrDecoder;

        let encoder = QrCodeEncoder::new();
        let decoder = QrDecoder::new();

        let original = "Test payload for round trip";
        let image = encoder.encode(original, EcLevel::Q, 4).unwrap();
        let decoded = decoder.decode_gray(&image).unwrap();

        assert_eq!(decoded, original);
    }
}
