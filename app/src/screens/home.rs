//! Home dashboard screen
//!
//! Shows the latest profile snapshot read-only. Nothing is cached between
//! loads.

use crate::screens::view::DashboardView;
use crate::services::DashboardService;
use progress_tracker_shared::{InlineMessage, ReportError, UserProfile, WeightUnit};
use tracing::warn;

pub struct HomeScreen {
    service: DashboardService,
    weight_unit: WeightUnit,
    profile: Option<UserProfile>,
    message: Option<InlineMessage>,
}

impl HomeScreen {
    pub fn new(service: DashboardService, weight_unit: WeightUnit) -> Self {
        Self {
            service,
            weight_unit,
            profile: None,
            message: None,
        }
    }

    /// Fetch the profile snapshot, replacing whatever was shown before
    pub async fn load(&mut self) -> Result<(), ReportError> {
        match self.service.load_profile().await {
            Ok(profile) => {
                self.profile = profile;
                self.message = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Dashboard load failed");
                self.profile = None;
                self.message = Some(InlineMessage::from(&err));
                Err(err)
            }
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn message(&self) -> Option<&InlineMessage> {
        self.message.as_ref()
    }

    /// `None` until a profile has been loaded
    pub fn view(&self) -> Option<DashboardView> {
        self.profile
            .as_ref()
            .map(|profile| DashboardView::from_profile(profile, self.weight_unit))
    }
}
