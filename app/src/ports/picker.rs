use crate::error::PickerError;
use async_trait::async_trait;
use progress_tracker_shared::LocalImage;

/// Result of a completed picker interaction
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    Picked(LocalImage),
    Cancelled,
}

/// Device image picker
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick(&self) -> Result<PickOutcome, PickerError>;
}
