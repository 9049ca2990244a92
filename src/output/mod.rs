//! Terminal rendering of the page: preview surface, alerts and state snapshots

use crate::error::Result;
use crate::page::{Alert, QrPage};
use crate::qr::{QrEncoder, png};
use crate::storage::ImageStore;
use image::GrayImage;
use serde_json::{Value, json};

/// Luma values below this count as dark modules
const DARK_THRESHOLD: u8 = 128;

/// Combined structured and human-readable representation of an alert
#[derive(Debug, Clone)]
pub struct RenderedAlert {
    /// Structured JSON representation
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render an alert into both JSON and dialog-style text.
pub fn render_alert(alert: &Alert) -> RenderedAlert {
    let json = json!({
        "alert": {
            "title": alert.title,
            "message": alert.message,
            "kind": alert.kind,
        }
    });

    let mut human = vec![format!("[{}]", alert.title)];
    human.extend(alert.message.lines().map(|line| format!("  {line}")));
    human.push(format!("  ({})", Alert::ACKNOWLEDGE));

    RenderedAlert { json, human }
}

/// Render the preview surface from PNG bytes.
///
/// The image is sampled at the centre of every `scale` x `scale` module and
/// two module rows are folded into one line of half-block characters.
pub fn render_preview(png_bytes: &[u8], scale: u32) -> Result<Vec<String>> {
    let image = png::decode_png(png_bytes)?.to_luma8();
    Ok(preview_lines(&image, scale.max(1)))
}

fn preview_lines(image: &GrayImage, scale: u32) -> Vec<String> {
    let columns = image.width() / scale;
    let rows = image.height() / scale;
    let centre = scale / 2;

    let dark = |col: u32, row: u32| -> bool {
        row < rows && image.get_pixel(col * scale + centre, row * scale + centre).0[0] < DARK_THRESHOLD
    };

    (0..rows)
        .step_by(2)
        .map(|row| {
            (0..columns)
                .map(|col| match (dark(col, row), dark(col, row + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect::<String>()
        })
        .collect()
}

/// JSON snapshot of the page state.
pub fn page_state_value<E: QrEncoder, S: ImageStore>(page: &QrPage<E, S>) -> Value {
    let settings = page.settings();
    json!({
        "input": page.input(),
        "result_visible": page.is_result_visible(),
        "image_bytes": page.last_image().map(|image| image.len()),
        "error_correction": settings.ec_level.as_str(),
        "scale": settings.scale,
    })
}

/// Human-readable lines describing the page state.
pub fn page_state_lines<E: QrEncoder, S: ImageStore>(page: &QrPage<E, S>) -> Vec<String> {
    let settings = page.settings();
    let image = match page.last_image() {
        Some(image) => format!("{} bytes", image.len()),
        None => "none".to_string(),
    };

    vec![
        format!("Input: {:?}", page.input()),
        format!("Result pane: {}", if page.is_result_visible() { "shown" } else { "hidden" }),
        format!("Image: {image}"),
        format!(
            "Settings: error correction {}, {} px/module",
            settings.ec_level, settings.scale
        ),
    ]
}
