//! Filesystem collaborator for saving generated images
//!
//! [`ImageStore`] abstracts the three platform services the save action
//! needs: the documents directory, the app-private data directory, and a
//! byte writer. [`FsImageStore`] is the tokio-backed implementation.

use crate::config::OutputOptions;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "qrgen";

/// Platform file services used by the save action
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// The user's documents directory, if the platform has one
    fn documents_dir(&self) -> Option<PathBuf>;

    /// The application's private data directory
    fn app_data_dir(&self) -> PathBuf;

    /// Write `bytes` to `path`, replacing any existing file
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Pick the save directory: documents when available and non-empty,
/// otherwise the app data directory.
pub fn resolve_target_dir<S: ImageStore + ?Sized>(store: &S) -> PathBuf {
    store
        .documents_dir()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| store.app_data_dir())
}

/// File name for a snapshot taken at `timestamp`, e.g. `qrcode_20240101_120000.png`.
pub fn snapshot_file_name<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("qrcode_{}.png", timestamp.format("%Y%m%d_%H%M%S"))
}

/// [`ImageStore`] backed by the local filesystem
#[derive(Debug, Clone)]
pub struct FsImageStore {
    documents: Option<PathBuf>,
    app_data: PathBuf,
}

impl FsImageStore {
    /// Store with explicitly chosen directories
    pub fn with_dirs(documents: Option<PathBuf>, app_data: PathBuf) -> Self {
        Self {
            documents,
            app_data,
        }
    }

    /// Resolve directories from the output options and the platform's
    /// known-folder locations.
    pub fn from_options(options: &OutputOptions) -> Self {
        Self::resolve(options, dirs::document_dir, dirs::data_dir)
    }

    fn resolve(
        options: &OutputOptions,
        document_dir: impl FnOnce() -> Option<PathBuf>,
        data_dir: impl FnOnce() -> Option<PathBuf>,
    ) -> Self {
        let documents = options.directory.clone().or_else(document_dir);
        let app_data = data_dir()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(env::temp_dir)
            .join(APP_DIR_NAME);

        tracing::debug!(?documents, app_data = %app_data.display(), "Resolved save directories");
        Self::with_dirs(documents, app_data)
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    fn documents_dir(&self) -> Option<PathBuf> {
        self.documents.clone()
    }

    fn app_data_dir(&self) -> PathBuf {
        self.app_data.clone()
    }

    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Utc};

    #[test]
    fn file_name_uses_compact_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(snapshot_file_name(&ts), "qrcode_20240101_120000.png");

        let local = Local.with_ymd_and_hms(2023, 12, 31, 23, 59, 7).unwrap();
        assert_eq!(snapshot_file_name(&local), "qrcode_20231231_235907.png");
    }

    #[test]
    fn explicit_directory_wins() {
        let options = OutputOptions {
            directory: Some(PathBuf::from("/srv/codes")),
        };
        let store = FsImageStore::resolve(
            &options,
            || Some(PathBuf::from("/home/user/Documents")),
            || Some(PathBuf::from("/home/user/.local/share")),
        );
        assert_eq!(store.documents_dir(), Some(PathBuf::from("/srv/codes")));
    }

    #[test]
    fn platform_directories_are_used() {
        let store = FsImageStore::resolve(
            &OutputOptions::default(),
            || Some(PathBuf::from("/home/user/Dokumente")),
            || Some(PathBuf::from("/home/user/.local/share")),
        );
        assert_eq!(
            store.documents_dir(),
            Some(PathBuf::from("/home/user/Dokumente"))
        );
        assert_eq!(
            store.app_data_dir(),
            PathBuf::from("/home/user/.local/share/qrgen")
        );
    }

    #[test]
    fn missing_documents_falls_back_to_app_data() {
        let store = FsImageStore::resolve(
            &OutputOptions::default(),
            || None,
            || Some(PathBuf::from(r"C:\Users\user\AppData\Roaming")),
        );
        assert_eq!(store.documents_dir(), None);
        assert_eq!(
            store.app_data_dir(),
            PathBuf::from(r"C:\Users\user\AppData\Roaming").join("qrgen")
        );
        assert_eq!(resolve_target_dir(&store), store.app_data_dir());
    }

    #[test]
    fn no_data_dir_uses_temp() {
        let store = FsImageStore::resolve(&OutputOptions::default(), || None, || None);
        assert_eq!(store.app_data_dir(), env::temp_dir().join("qrgen"));
    }

    #[test]
    fn from_options_matches_platform_lookup() {
        let store = FsImageStore::from_options(&OutputOptions::default());
        assert_eq!(store.documents_dir(), dirs::document_dir());
    }

    #[test]
    fn empty_documents_path_is_ignored() {
        let store = FsImageStore::with_dirs(Some(PathBuf::new()), PathBuf::from("/data"));
        assert_eq!(resolve_target_dir(&store), PathBuf::from("/data"));
    }

    #[tokio::test]
    async fn write_creates_missing_directories() {
        let root = env::temp_dir().join(format!("qrgen-store-{}", uuid::Uuid::new_v4()));
        let store = FsImageStore::with_dirs(None, root.clone());
        let path = root.join("nested").join("out.png");

        store.write_bytes(&path, b"payload").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"payload");

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
