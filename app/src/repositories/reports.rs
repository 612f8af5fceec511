//! Report repository for database operations

use crate::error::DatabaseResult;
use crate::ports::StructuredDatabase;
use progress_tracker_shared::{Report, ReportRecord};
use tracing::warn;

/// Path holding every report of one user
pub fn reports_path(user_id: &str) -> String {
    format!("reports/{user_id}")
}

/// Report repository for database operations
pub struct ReportRepository;

impl ReportRepository {
    /// Write a new report and return its backend-assigned key
    pub async fn create(
        db: &dyn StructuredDatabase,
        user_id: &str,
        record: &ReportRecord,
    ) -> DatabaseResult<String> {
        let value = serde_json::to_value(record)?;
        db.write_new(&reports_path(user_id), value).await
    }

    /// Get all reports for a user, in no particular order
    ///
    /// Records that fail to decode or break the report invariants are
    /// skipped with a warning instead of failing the whole list.
    pub async fn list(db: &dyn StructuredDatabase, user_id: &str) -> DatabaseResult<Vec<Report>> {
        let children = db.read_all(&reports_path(user_id)).await?;

        let reports = children
            .into_iter()
            .filter_map(|(key, value)| {
                let decoded = serde_json::from_value::<ReportRecord>(value)
                    .map_err(|e| e.to_string())
                    .and_then(|record| Report::from_record(key.clone(), record));
                match decoded {
                    Ok(report) => Some(report),
                    Err(reason) => {
                        warn!(user_id, key = %key, %reason, "Skipping malformed report record");
                        None
                    }
                }
            })
            .collect();

        Ok(reports)
    }
}
