//! The QR page controller
//!
//! [`QrPage`] owns the page state (input text, last generated PNG, result
//! pane visibility, preview) and implements the three button actions. Every
//! action runs to completion before the next one starts; the `&mut self`
//! receivers are what serialise user gestures.

mod alert;

pub use alert::{Alert, AlertKind};

use crate::config::QrOptions;
use crate::error::{Error, Result};
use crate::qr::{EcLevel, QrEncoder, png};
use crate::storage::{self, ImageStore};
use bytes::Bytes;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// A discrete user gesture on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The text field now holds this text
    InputChanged(String),
    /// The Generate button was pressed
    GenerateClicked,
    /// The Save button was pressed
    SaveClicked,
    /// The Clear button was pressed
    ClearClicked,
}

/// Encoder settings applied on every Generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSettings {
    /// Error-correction level
    pub ec_level: EcLevel,
    /// Pixels per module
    pub scale: u32,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::Q,
            scale: crate::qr::DEFAULT_SCALE,
        }
    }
}

impl From<&QrOptions> for GenerateSettings {
    fn from(options: &QrOptions) -> Self {
        Self {
            ec_level: options.error_correction,
            scale: options.effective_scale(),
        }
    }
}

/// Page controller composing a QR encoder and an image store
pub struct QrPage<E, S> {
    encoder: E,
    store: S,
    settings: GenerateSettings,
    input: String,
    last_image: Option<Bytes>,
    result_visible: bool,
    preview: Option<Bytes>,
}

impl<E: QrEncoder, S: ImageStore> QrPage<E, S> {
    /// Create an empty page
    pub fn new(encoder: E, store: S, settings: GenerateSettings) -> Self {
        Self {
            encoder,
            store,
            settings,
            input: String::new(),
            last_image: None,
            result_visible: false,
            preview: None,
        }
    }

    /// Current contents of the text field
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the contents of the text field
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// PNG bytes of the last successful generation
    pub fn last_image(&self) -> Option<&Bytes> {
        self.last_image.as_ref()
    }

    /// Whether the result pane is shown
    pub fn is_result_visible(&self) -> bool {
        self.result_visible
    }

    /// Bytes currently bound to the preview surface
    pub fn preview(&self) -> Option<&Bytes> {
        self.preview.as_ref()
    }

    /// Encoder settings in use
    pub fn settings(&self) -> GenerateSettings {
        self.settings
    }

    /// The store used by Save
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate a QR code from the current input.
    ///
    /// On success the PNG bytes become the last image and the preview, and
    /// the result pane is shown. Failures leave the state untouched, except
    /// that an unsupported encoder also discards the last image and preview.
    pub fn generate(&mut self) -> Result<Bytes> {
        if self.input.trim().is_empty() {
            return Err(Error::InputRequired);
        }

        let GenerateSettings { ec_level, scale } = self.settings;
        let rendered = self
            .encoder
            .encode(&self.input, ec_level, scale)
            .and_then(|image| png::encode_png(&image))
            .map_err(Error::into_generation);

        match rendered {
            Ok(png) => {
                tracing::info!(
                    bytes = png.len(),
                    chars = self.input.chars().count(),
                    %ec_level,
                    scale,
                    "Generated QR code"
                );
                self.last_image = Some(png.clone());
                self.preview = Some(png.clone());
                self.result_visible = true;
                Ok(png)
            }
            Err(Error::UnsupportedPlatform) => {
                tracing::warn!("QR encoder unavailable in this build");
                self.last_image = None;
                self.preview = None;
                Err(Error::UnsupportedPlatform)
            }
            Err(err) => {
                tracing::warn!(error = %err, "QR generation failed");
                Err(err)
            }
        }
    }

    /// Save the last generated image, named after the current local time.
    pub async fn save(&self) -> Result<PathBuf> {
        self.save_at(Local::now()).await
    }

    /// Save the last generated image, named after `timestamp`.
    pub async fn save_at(&self, timestamp: DateTime<Local>) -> Result<PathBuf> {
        let image = match &self.last_image {
            Some(image) if !image.is_empty() => image,
            _ => return Err(Error::NoImage),
        };

        let dir = storage::resolve_target_dir(&self.store);
        let path = dir.join(storage::snapshot_file_name(&timestamp));

        self.store
            .write_bytes(&path, image)
            .await
            .map_err(|e| Error::Save(format!("{}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), bytes = image.len(), "Saved QR code");
        Ok(path)
    }

    /// Hide the result pane, empty the text field and drop the image.
    pub fn clear(&mut self) {
        self.result_visible = false;
        self.input.clear();
        self.last_image = None;
        self.preview = None;
    }

    /// Run the handler for `event` and report the outcome the way the page
    /// would: an alert for every failure and for a successful save.
    pub async fn dispatch(&mut self, event: PageEvent) -> Option<Alert> {
        tracing::debug!(?event, "Page event");

        let outcome = match event {
            PageEvent::InputChanged(text) => {
                self.set_input(text);
                return None;
            }
            PageEvent::GenerateClicked => self.generate().map(|_| None),
            PageEvent::SaveClicked => self.save().await.map(|path| Some(Alert::saved(&path))),
            PageEvent::ClearClicked => {
                self.clear();
                return None;
            }
        };

        outcome.unwrap_or_else(|err| Some(Alert::from(&err)))
    }
}
