//! View models handed to the UI layer
//!
//! Plain strings and flags; layout and styling belong to the UI shell.

use progress_tracker_shared::{ReportHistoryEntry, UserProfile, WeightUnit};
use serde::Serialize;

/// One row of the report history list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportListItem {
    pub id: String,
    pub date: String,
    pub weight: String,
    pub last_weight: Option<String>,
    pub percentage_change: Option<String>,
    pub images: Vec<String>,
    pub custom_fields: Vec<String>,
}

impl ReportListItem {
    pub fn from_entry(entry: &ReportHistoryEntry, unit: WeightUnit) -> Self {
        Self {
            id: entry.report.id.clone(),
            date: entry.report.date.format("%Y-%m-%d %H:%M").to_string(),
            weight: unit.label(entry.report.weight),
            last_weight: entry.last_weight.map(|w| unit.label(w)),
            percentage_change: entry.percentage_change.map(|p| format!("{p:+.1}%")),
            images: entry.report.images.clone(),
            custom_fields: entry.report.custom_fields.clone(),
        }
    }
}

/// Read-only dashboard content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub progress_photo_url: Option<String>,
    pub weight_line: String,
    pub target_weight_line: Option<String>,
}

impl DashboardView {
    pub fn from_profile(profile: &UserProfile, unit: WeightUnit) -> Self {
        Self {
            progress_photo_url: profile.progress_photo_url.clone(),
            weight_line: format!("Weight: {}", unit.label(profile.current_weight)),
            target_weight_line: profile
                .target_weight
                .map(|target| format!("Target Weight: {}", unit.label(target))),
        }
    }
}
