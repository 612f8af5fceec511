//! Report submission and history service
//!
//! Provides the pipeline behind the report screen:
//! - Submission: validate → upload images concurrently → write one record
//! - History: read all records → order chronologically → derive metrics
//!
//! Every failure leaves this module as a [`ReportError`].

use crate::error::{fetch_error, persist_error};
use crate::ports::{AuthProvider, ImageSource, ObjectStorage, StructuredDatabase};
use crate::repositories::ReportRepository;
use crate::state::Backend;
use chrono::Utc;
use futures::future::try_join_all;
use progress_tracker_shared::validation::parse_weight_input;
use progress_tracker_shared::{
    compute_history, DisplayOrder, LocalImage, ReportDraft, ReportError, ReportHistoryEntry,
    ReportRecord,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Storage path for one uploaded report image
///
/// Millisecond timestamp and index keep names ordered; the random suffix
/// keeps two uploads in the same millisecond from colliding.
pub fn image_path(user_id: &str, timestamp_millis: i64, index: usize) -> String {
    format!("reports/{user_id}/{timestamp_millis}-{index}-{}", Uuid::new_v4())
}

/// Report service for business logic
#[derive(Clone)]
pub struct ReportService {
    auth: Arc<dyn AuthProvider>,
    storage: Arc<dyn ObjectStorage>,
    database: Arc<dyn StructuredDatabase>,
    images: Arc<dyn ImageSource>,
    display_order: DisplayOrder,
}

impl ReportService {
    pub fn new(backend: &Backend) -> Self {
        Self {
            auth: backend.auth.clone(),
            storage: backend.storage.clone(),
            database: backend.database.clone(),
            images: backend.images.clone(),
            display_order: backend.config().reports.display_order,
        }
    }

    /// Turn a draft into a persisted report and return its key
    ///
    /// The record is written only after every image upload has succeeded.
    /// Objects uploaded before a failing sibling are left orphaned. The
    /// `date` is the client clock at write time; skew between devices is
    /// not corrected.
    pub async fn submit(&self, draft: &ReportDraft) -> Result<String, ReportError> {
        let result = self.run_submission(draft).await;
        match &result {
            Ok(key) => {
                metrics::counter!("reports_submitted_total").increment(1);
                info!(report_id = %key, images = draft.images().len(), "Report submitted");
            }
            Err(err) => {
                metrics::counter!("report_submissions_failed_total", "kind" => err.code())
                    .increment(1);
                warn!(error = %err, "Report submission failed");
            }
        }
        result
    }

    async fn run_submission(&self, draft: &ReportDraft) -> Result<String, ReportError> {
        let weight = parse_weight_input(draft.weight_input()).map_err(ReportError::Validation)?;
        let user_id = self.auth.current_user_id().await?;

        let image_urls = self.upload_images(&user_id, draft.images()).await?;

        let record = ReportRecord {
            images: image_urls,
            weight,
            custom_fields: draft.custom_fields().to_vec(),
            date: Utc::now(),
        };
        record.check().map_err(ReportError::Validation)?;

        ReportRepository::create(self.database.as_ref(), &user_id, &record)
            .await
            .map_err(persist_error)
    }

    /// Upload all images concurrently, keeping draft order in the result
    async fn upload_images(
        &self,
        user_id: &str,
        images: &[LocalImage],
    ) -> Result<Vec<String>, ReportError> {
        let batch_millis = Utc::now().timestamp_millis();
        let uploads = images
            .iter()
            .enumerate()
            .map(|(index, image)| self.upload_image(user_id, batch_millis, index, image));
        try_join_all(uploads).await
    }

    async fn upload_image(
        &self,
        user_id: &str,
        batch_millis: i64,
        index: usize,
        image: &LocalImage,
    ) -> Result<String, ReportError> {
        let payload = self.images.read(image).await?;
        let path = image_path(user_id, batch_millis, index);
        debug!(path = %path, bytes = payload.len(), "Uploading report image");

        let url = self.storage.upload(&path, payload).await?;
        metrics::counter!("report_images_uploaded_total").increment(1);
        Ok(url)
    }

    /// History of the signed-in user
    pub async fn fetch_current_history(&self) -> Result<Vec<ReportHistoryEntry>, ReportError> {
        let user_id = self.auth.current_user_id().await?;
        self.fetch_history(&user_id).await
    }

    /// All reports of `user_id` with derived metrics, in display order
    pub async fn fetch_history(&self, user_id: &str) -> Result<Vec<ReportHistoryEntry>, ReportError> {
        metrics::counter!("report_history_fetches_total").increment(1);
        let reports = ReportRepository::list(self.database.as_ref(), user_id)
            .await
            .map_err(fetch_error)?;

        debug!(user_id, count = reports.len(), "Fetched report history");
        Ok(compute_history(reports, self.display_order))
    }
}
