use crate::error::StorageResult;
use async_trait::async_trait;
use progress_tracker_shared::LocalImage;

/// Binary object storage
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `payload` under `path` and return a stable retrieval URL
    async fn upload(&self, path: &str, payload: Vec<u8>) -> StorageResult<String>;
}

/// Turns a device image reference into the bytes to upload
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn read(&self, image: &LocalImage) -> StorageResult<Vec<u8>>;
}
