//! Dashboard service - reads the profile snapshot shown on the home screen

use crate::error::fetch_error;
use crate::ports::{AuthProvider, StructuredDatabase};
use crate::repositories::ProfileRepository;
use crate::state::Backend;
use progress_tracker_shared::{ReportError, UserProfile};
use std::sync::Arc;
use tracing::debug;

/// Dashboard service for the home screen
#[derive(Clone)]
pub struct DashboardService {
    auth: Arc<dyn AuthProvider>,
    database: Arc<dyn StructuredDatabase>,
}

impl DashboardService {
    pub fn new(backend: &Backend) -> Self {
        Self {
            auth: backend.auth.clone(),
            database: backend.database.clone(),
        }
    }

    /// Latest profile snapshot of the signed-in user, uncached
    pub async fn load_profile(&self) -> Result<Option<UserProfile>, ReportError> {
        let user_id = self.auth.current_user_id().await?;
        let profile = ProfileRepository::get(self.database.as_ref(), &user_id)
            .await
            .map_err(fetch_error)?;
        debug!(user_id = %user_id, found = profile.is_some(), "Loaded dashboard profile");
        Ok(profile)
    }
}
