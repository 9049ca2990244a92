//! qrgen terminal entrypoint

use clap::Parser;
use qrgen::console::{self, Command};
use qrgen::output::{self, render_alert};
use qrgen::{
    Alert, EcLevel, Error, FsImageStore, GenerateSettings, PageEvent, QrCodeEncoder, QrDecoder,
    QrPage, QrgenConfig, Result, logging,
};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

type Page = QrPage<QrCodeEncoder, FsImageStore>;

#[derive(Parser, Debug)]
#[command(
    name = "qrgen",
    version,
    about = "Generate, preview and save QR code images"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrgen.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Generate a code for this text and exit instead of starting the interactive page
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// With --text, also save the generated PNG
    #[arg(long, requires = "text")]
    save: bool,

    /// Directory to save into instead of the documents directory
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Error-correction level (L, M, Q or H)
    #[arg(long, value_name = "LEVEL")]
    ec_level: Option<EcLevel>,

    /// Pixels per QR module
    #[arg(long, value_name = "PIXELS")]
    scale: Option<u32>,

    /// Render without the light border around the symbol
    #[arg(long)]
    no_quiet_zone: bool,

    /// Do not print the terminal preview after generating
    #[arg(long)]
    no_preview: bool,

    /// Decode every generated PNG and check it reads back as the input text
    #[arg(long)]
    verify: bool,

    /// Output results as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Read a saved QR code PNG, print its text and exit
    #[arg(long, value_name = "PATH", conflicts_with = "text")]
    decode: Option<PathBuf>,
}

/// Where page output goes: preview, alerts and state
struct Console {
    json: bool,
    preview: bool,
    verify: bool,
}

impl Console {
    fn emit_alert(&self, alert: &Alert) -> Result<()> {
        let rendered = render_alert(alert);
        if self.json {
            println!("{}", serde_json::to_string(&rendered.json)?);
        } else {
            for line in &rendered.human {
                println!("{line}");
            }
        }
        Ok(())
    }

    fn emit_generated(&self, page: &Page) -> Result<()> {
        let Some(png) = page.preview() else {
            return Ok(());
        };

        let verified = if self.verify {
            Some(verify_round_trip(png, page.input()))
        } else {
            None
        };

        if self.json {
            let payload = json!({
                "generated": {
                    "bytes": png.len(),
                    "verified": verified,
                }
            });
            println!("{}", serde_json::to_string(&payload)?);
            return Ok(());
        }

        if self.preview {
            for line in output::render_preview(png, page.settings().scale)? {
                println!("{line}");
            }
        }
        println!("Generated QR code ({} bytes)", png.len());
        match verified {
            Some(true) => println!("Verified: decodes back to the input text"),
            Some(false) => println!("Verification failed: see log for details"),
            None => {}
        }
        Ok(())
    }

    fn emit_state(&self, page: &Page) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(&output::page_state_value(page))?);
        } else {
            for line in output::page_state_lines(page) {
                println!("{line}");
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = QrgenConfig::load(cli.config.as_deref())?;

    if let Some(dir) = cli.out_dir.clone() {
        config.output.directory = Some(dir);
    }
    if let Some(level) = cli.ec_level {
        config.qr.error_correction = level;
    }
    if let Some(scale) = cli.scale {
        config.qr.scale = scale;
    }
    if cli.no_quiet_zone {
        config.qr.quiet_zone = false;
    }

    logging::init(&config.logging)?;

    if let Some(path) = cli.decode.as_deref() {
        let bytes = tokio::fs::read(path).await?;
        let text = QrDecoder::new().decode_png(&bytes)?;
        if cli.json {
            println!("{}", json!({ "path": path, "text": text }));
        } else {
            println!("{text}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let encoder = QrCodeEncoder::with_quiet_zone(config.qr.quiet_zone);
    let store = FsImageStore::from_options(&config.output);
    let settings = GenerateSettings::from(&config.qr);
    info!(?settings, "Starting qrgen page");

    let mut page = QrPage::new(encoder, store, settings);
    let sink = Console {
        json: cli.json,
        preview: !cli.no_preview,
        verify: cli.verify,
    };

    match cli.text {
        Some(text) => {
            let succeeded = run_once(&mut page, &sink, text, cli.save).await?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            run_interactive(&mut page, &sink).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Generate (and optionally save) once. A failed action is reported as an
/// alert only and yields `Ok(false)`; `Err` is reserved for output failures.
async fn run_once(page: &mut Page, sink: &Console, text: String, save: bool) -> Result<bool> {
    page.set_input(text);

    if let Err(err) = page.generate() {
        sink.emit_alert(&Alert::from(&err))?;
        return Ok(false);
    }
    sink.emit_generated(page)?;

    if save {
        match page.save().await {
            Ok(path) => sink.emit_alert(&Alert::saved(&path))?,
            Err(err) => {
                sink.emit_alert(&Alert::from(&err))?;
                return Ok(false);
            }
        }
    }

    Ok(true)
}

async fn run_interactive(page: &mut Page, sink: &Console) -> Result<()> {
    if !sink.json {
        println!("{}", console::HELP);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if !sink.json {
            print!("> ");
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match console::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                sink.emit_alert(&Alert::from(&Error::Other(message)))?;
                continue;
            }
        };

        match command {
            Command::Page(event) => {
                let generating = event == PageEvent::GenerateClicked;
                match page.dispatch(event).await {
                    Some(alert) => sink.emit_alert(&alert)?,
                    None if generating => sink.emit_generated(page)?,
                    None => {}
                }
            }
            Command::Show => sink.emit_state(page)?,
            Command::Help => println!("{}", console::HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn verify_round_trip(png: &[u8], expected: &str) -> bool {
    match QrDecoder::new().decode_png(png) {
        Ok(decoded) if decoded == expected => true,
        Ok(decoded) => {
            tracing::warn!(%decoded, %expected, "Round-trip mismatch");
            false
        }
        Err(err) => {
            tracing::warn!(error = %err, "Round-trip decode failed");
            false
        }
    }
}
