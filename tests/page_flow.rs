#![cfg(feature = "render")]

use std::env;
use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};

use qrgen::qr::png;
use qrgen::{
    Error, FsImageStore, GenerateSettings, PageEvent, QrCodeEncoder, QrDecoder, QrPage,
};

fn scratch_dir() -> PathBuf {
    env::temp_dir().join(format!("qrgen-it-{}", uuid::Uuid::new_v4()))
}

fn page_in(root: &Path) -> QrPage<QrCodeEncoder, FsImageStore> {
    let store = FsImageStore::with_dirs(Some(root.join("Documents")), root.join("app-data"));
    QrPage::new(QrCodeEncoder::new(), store, GenerateSettings::default())
}

#[tokio::test]
async fn generate_save_clear_scenario() {
    let root = scratch_dir();
    let mut page = page_in(&root);

    page.set_input("https://example.com");
    let image = page.generate().expect("generate");
    assert!(page.is_result_visible());
    assert!(png::is_png(&image));

    let timestamp = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let path = page.save_at(timestamp).await.expect("save");
    assert_eq!(
        path,
        root.join("Documents").join("qrcode_20240101_120000.png")
    );

    let written = tokio::fs::read(&path).await.expect("read saved file");
    assert_eq!(written, image.to_vec());

    page.clear();
    assert_eq!(page.input(), "");
    assert!(!page.is_result_visible());
    assert!(page.last_image().is_none());

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn saved_file_decodes_back_to_input() {
    let root = scratch_dir();
    let mut page = page_in(&root);

    let text = "Hello from qrgen: 0123456789 ABC";
    page.set_input(text);
    page.generate().expect("generate");
    let path = page.save().await.expect("save");

    let bytes = tokio::fs::read(&path).await.expect("read saved file");
    let decoded = QrDecoder::new().decode_png(&bytes).expect("decode");
    assert_eq!(decoded, text);

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn save_before_generate_creates_nothing() {
    let root = scratch_dir();
    let page = page_in(&root);

    assert!(matches!(page.save().await, Err(Error::NoImage)));
    assert!(!root.exists());
}

#[tokio::test]
async fn dispatch_reports_every_outcome() {
    let root = scratch_dir();
    let mut page = page_in(&root);

    let alert = page
        .dispatch(PageEvent::InputChanged("   ".into()))
        .await;
    assert!(alert.is_none());

    let alert = page.dispatch(PageEvent::GenerateClicked).await.unwrap();
    assert_eq!(alert.title, "Input required");
    assert!(page.last_image().is_none());

    page.dispatch(PageEvent::InputChanged("x".repeat(5000)))
        .await;
    let alert = page.dispatch(PageEvent::GenerateClicked).await.unwrap();
    assert_eq!(alert.title, "Error");
    assert!(alert.message.starts_with("Failed to generate QR code: "));
    assert!(!page.is_result_visible());

    page.dispatch(PageEvent::InputChanged("ok".into())).await;
    assert!(page.dispatch(PageEvent::GenerateClicked).await.is_none());

    let alert = page.dispatch(PageEvent::SaveClicked).await.unwrap();
    assert_eq!(alert.title, "Saved");

    let _ = tokio::fs::remove_dir_all(&root).await;
}
