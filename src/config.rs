//! qrgen runtime configuration handling

use crate::error::{Error, Result};
use crate::qr::{DEFAULT_SCALE, EcLevel};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrgenConfig {
    /// QR rendering settings
    pub qr: QrOptions,
    /// Where saved images go
    pub output: OutputOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrgenConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrgen.toml / qrgen.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrgen.toml", "qrgen.yaml", "qrgen.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrgen");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.qr.apply_env_overrides();
        self.output.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// QR rendering settings handed to the page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    /// Error-correction level (`l`, `m`, `q` or `h`)
    pub error_correction: EcLevel,
    /// Pixels per QR module
    pub scale: u32,
    /// Draw the 4-module light border around the symbol
    pub quiet_zone: bool,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            error_correction: EcLevel::Q,
            scale: DEFAULT_SCALE,
            quiet_zone: true,
        }
    }
}

impl QrOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRGEN_EC_LEVEL") {
            match EcLevel::parse(&level) {
                Some(parsed) => self.error_correction = parsed,
                None => tracing::warn!("Ignoring QRGEN_EC_LEVEL='{level}'"),
            }
        }
        if let Ok(scale) = env::var("QRGEN_SCALE") {
            if let Ok(parsed) = scale.parse::<u32>() {
                self.scale = parsed;
            }
        }
        if let Ok(quiet) = env::var("QRGEN_QUIET_ZONE") {
            if let Some(flag) = parse_flag(&quiet) {
                self.quiet_zone = flag;
            }
        }
    }

    /// Module scale clamped to at least one pixel
    pub fn effective_scale(&self) -> u32 {
        self.scale.max(1)
    }
}

/// Output location overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Directory used in place of the user's documents directory
    pub directory: Option<PathBuf>,
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("QRGEN_OUTPUT_DIR") {
            if dir.trim().is_empty() {
                self.directory = None;
            } else {
                self.directory = Some(PathBuf::from(dir));
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRGEN_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in terminal logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRGEN_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRGEN_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRGEN_LOG_COLOR") {
            if let Some(flag) = parse_flag(&color) {
                self.color = flag;
            }
        }
        if let Ok(rotation) = env::var("QRGEN_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
