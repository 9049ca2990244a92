//! Generate a QR code, preview it in the terminal and save it
//!
//! Usage: cargo run --example generate_qr -- [TEXT]

use qrgen::config::OutputOptions;
use qrgen::output::render_preview;
use qrgen::{FsImageStore, GenerateSettings, QrCodeEncoder, QrDecoder, QrPage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hello from qrgen!".to_string());

    // Small modules keep the terminal preview readable.
    let settings = GenerateSettings {
        scale: 4,
        ..Default::default()
    };
    let store = FsImageStore::from_options(&OutputOptions::default());
    let mut page = QrPage::new(QrCodeEncoder::new(), store, settings);

    page.set_input(text.as_str());
    let png = page.generate()?;

    for line in render_preview(&png, settings.scale)? {
        println!("{line}");
    }

    let decoded = QrDecoder::new().decode_png(&png)?;
    println!("✓ Decodes back to: {decoded}");

    let path = page.save().await?;
    println!("✓ QR code saved to {}", path.display());

    Ok(())
}
