use crate::error::{StorageError, StorageResult};
use crate::ports::ImageSource;
use async_trait::async_trait;
use progress_tracker_shared::LocalImage;

/// Reads picked images from the local filesystem
///
/// Accepts plain paths and `file://` URIs.
#[derive(Debug, Clone, Default)]
pub struct FsImageSource;

#[async_trait]
impl ImageSource for FsImageSource {
    async fn read(&self, image: &LocalImage) -> StorageResult<Vec<u8>> {
        let path = image.uri().strip_prefix("file://").unwrap_or(image.uri());
        tokio::fs::read(path)
            .await
            .map_err(|e| StorageError::ImageRead {
                uri: image.uri().to_string(),
                reason: e.to_string(),
            })
    }
}
