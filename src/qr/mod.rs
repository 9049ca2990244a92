//! QR code encoding and decoding
//!
//! The page talks to the encoder through the [`QrEncoder`] trait so the
//! generate path can be exercised with any backend. The built-in backend is
//! [`QrCodeEncoder`]; [`QrDecoder`] reads codes back for verification.

mod decoder;
mod encoder;
pub mod png;

pub use decoder::QrDecoder;
pub use encoder::{MAX_IMAGE_SIDE, QrCodeEncoder};

use crate::error::Result;
use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Module scale used when nothing else is configured (pixels per module)
pub const DEFAULT_SCALE: u32 = 20;

/// Turns text into a rendered QR pixel matrix.
pub trait QrEncoder {
    /// Encode `text` at the given error-correction level, drawing each module
    /// as a `scale` x `scale` pixel square.
    fn encode(&self, text: &str, ec_level: EcLevel, scale: u32) -> Result<GrayImage>;
}

impl<T: QrEncoder + ?Sized> QrEncoder for &T {
    fn encode(&self, text: &str, ec_level: EcLevel, scale: u32) -> Result<GrayImage> {
        (**self).encode(text, ec_level, scale)
    }
}

/// QR error-correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcLevel {
    /// About 7% recovery
    #[serde(alias = "L")]
    L,
    /// About 15% recovery
    #[serde(alias = "M")]
    M,
    /// About 25% recovery
    #[default]
    #[serde(alias = "Q")]
    Q,
    /// About 30% recovery
    #[serde(alias = "H")]
    H,
}

impl EcLevel {
    /// Canonical single-letter name
    pub fn as_str(self) -> &'static str {
        match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        }
    }

    /// Parse a level name (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Some(EcLevel::L),
            "m" | "medium" => Some(EcLevel::M),
            "q" | "quartile" => Some(EcLevel::Q),
            "h" | "high" => Some(EcLevel::H),
            _ => None,
        }
    }
}

impl FromStr for EcLevel {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unknown error-correction level '{value}', expected L, M, Q or H")
        })
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
