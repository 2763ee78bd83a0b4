//! Delivering finished exports to a file or an HTTP response.

use super::error::ExportError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Content type of every export.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Cache policy attached to served exports.
pub const EXPORT_CACHE_CONTROL: &str = "public, max-age=3600";

/// Writes exports as `map_highres_<epoch-ms>.png` into a directory.
#[derive(Debug, Clone)]
pub struct FileDelivery {
    dir: PathBuf,
}

impl FileDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for an export finished at `epoch_ms`.
    pub fn file_name(epoch_ms: i64) -> String {
        format!("map_highres_{}.png", epoch_ms)
    }

    /// Writes `png`, creating the directory if needed.
    ///
    /// Returns the path of the written file.
    pub async fn deliver(&self, png: &[u8]) -> Result<PathBuf, ExportError> {
        self.deliver_at(png, chrono::Utc::now().timestamp_millis()).await
    }

    /// [`Self::deliver`] with an explicit timestamp.
    pub async fn deliver_at(&self, png: &[u8], epoch_ms: i64) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(Self::file_name(epoch_ms));
        tokio::fs::write(&path, png).await?;
        info!(path = %path.display(), bytes = png.len(), "Export written");
        Ok(path)
    }
}

/// PNG body plus the headers it is served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpImageResponse {
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub cache_control: &'static str,
}

impl HttpImageResponse {
    pub fn png(body: Vec<u8>) -> Self {
        Self {
            body,
            content_type: PNG_CONTENT_TYPE,
            cache_control: EXPORT_CACHE_CONTROL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(
            FileDelivery::file_name(1_700_000_000_123),
            "map_highres_1700000000123.png"
        );
    }

    #[tokio::test]
    async fn test_deliver_writes_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let delivery = FileDelivery::new(temp.path().join("exports"));

        let path = delivery.deliver_at(&[1, 2, 3], 42).await.unwrap();
        assert_eq!(path, temp.path().join("exports").join("map_highres_42.png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_deliver_into_file_path_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let result = FileDelivery::new(&blocker).deliver(&[0]).await;
        assert!(matches!(result, Err(ExportError::Delivery(_))));
    }

    #[test]
    fn test_http_response_headers() {
        let response = HttpImageResponse::png(vec![0x89]);
        assert_eq!(response.content_type, "image/png");
        assert_eq!(response.cache_control, "public, max-age=3600");
    }
}
