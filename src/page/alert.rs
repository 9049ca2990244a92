//! Modal alerts shown to the user after an action

use crate::error::Error;
use serde::Serialize;
use std::path::Path;

/// Severity of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Confirmation of a completed action
    Info,
    /// An action failed
    Error,
}

/// A titled message the user acknowledges with "OK"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Short dialog title
    pub title: String,
    /// Descriptive message
    pub message: String,
    /// Severity
    pub kind: AlertKind,
}

impl Alert {
    /// Label of the single acknowledgement button
    pub const ACKNOWLEDGE: &'static str = "OK";

    /// Confirmation that the image was written to `path`
    pub fn saved(path: &Path) -> Self {
        Self {
            title: "Saved".to_string(),
            message: format!("QR code saved to:\n{}", path.display()),
            kind: AlertKind::Info,
        }
    }

    /// Whether this alert reports a failure
    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

impl From<&Error> for Alert {
    fn from(err: &Error) -> Self {
        Self {
            title: err.alert_title().to_string(),
            message: err.to_string(),
            kind: AlertKind::Error,
        }
    }
}
