//! Profile snapshot repository

use crate::error::DatabaseResult;
use crate::ports::StructuredDatabase;
use progress_tracker_shared::UserProfile;

/// Path holding the profile snapshot of one user
pub fn profile_path(user_id: &str) -> String {
    format!("users/{user_id}")
}

/// Read-only access to `users/{user_id}`
pub struct ProfileRepository;

impl ProfileRepository {
    /// Get the profile snapshot, `None` if the user has none yet
    pub async fn get(db: &dyn StructuredDatabase, user_id: &str) -> DatabaseResult<Option<UserProfile>> {
        match db.read(&profile_path(user_id)).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
