//! Error types for qrgen operations

use thiserror::Error;

/// Result type alias using qrgen's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrgen operations
///
/// The first five variants are the page-level failures a user can trigger;
/// their `Display` text is the message shown in the alert.
#[derive(Error, Debug)]
pub enum Error {
    /// Generate was pressed with empty or whitespace-only input
    #[error("Please enter text to generate QR code.")]
    InputRequired,

    /// The QR encoder is not available in this build
    #[error("QR code generation is not supported by this build.")]
    UnsupportedPlatform,

    /// QR encoding or PNG encoding failed
    #[error("Failed to generate QR code: {0}")]
    Generation(String),

    /// Save was pressed before any successful generation
    #[error("Please generate a QR code before saving.")]
    NoImage,

    /// Writing the PNG file failed
    #[error("Unable to save QR code: {0}")]
    Save(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Short title used for the alert dialog reporting this error.
    pub fn alert_title(&self) -> &'static str {
        match self {
            Error::InputRequired => "Input required",
            Error::UnsupportedPlatform => "Unsupported",
            Error::NoImage => "No image",
            Error::Save(_) => "Save failed",
            _ => "Error",
        }
    }

    /// Fold any failure on the generate path into `Generation`, keeping
    /// the page-level variants intact.
    pub(crate) fn into_generation(self) -> Self {
        match self {
            Error::InputRequired | Error::UnsupportedPlatform | Error::Generation(_) => self,
            Error::Image(message) | Error::Other(message) => Error::Generation(message),
            other => Error::Generation(other.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_titles_match_actions() {
        assert_eq!(Error::InputRequired.alert_title(), "Input required");
        assert_eq!(Error::UnsupportedPlatform.alert_title(), "Unsupported");
        assert_eq!(Error::Generation("x".into()).alert_title(), "Error");
        assert_eq!(Error::NoImage.alert_title(), "No image");
        assert_eq!(Error::Save("x".into()).alert_title(), "Save failed");
    }

    #[test]
    fn generation_wraps_cause() {
        let err = Error::Image("bad encoder".to_string()).into_generation();
        assert_eq!(err.to_string(), "Failed to generate QR code: bad encoder");

        let err = Error::UnsupportedPlatform.into_generation();
        assert!(matches!(err, Error::UnsupportedPlatform));
    }
}
