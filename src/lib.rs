//! qrgen - type text, preview its QR code, save it as PNG
//!
//! The library holds a single-page controller ([`QrPage`]) and the
//! collaborators it composes: a QR encoder, an in-memory PNG codec and a
//! filesystem image store. The `qrgen` binary puts the page in a terminal.
//!
//! # Example
//!
//! ```no_run
//! use qrgen::{FsImageStore, GenerateSettings, QrCodeEncoder, QrPage};
//! use qrgen::config::OutputOptions;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = FsImageStore::from_options(&OutputOptions::default());
//!     let mut page = QrPage::new(QrCodeEncoder::new(), store, GenerateSettings::default());
//!
//!     page.set_input("https://example.com");
//!     page.generate()?;
//!     let path = page.save().await?;
//!
//!     println!("Saved to {}", path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod output;
pub mod page;
pub mod qr;
pub mod storage;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, OutputOptions, QrOptions, QrgenConfig};
pub use page::{Alert, AlertKind, GenerateSettings, PageEvent, QrPage};
pub use qr::{EcLevel, QrCodeEncoder, QrDecoder, QrEncoder};
pub use storage::{FsImageStore, ImageStore};
