//! Progress Tracker Shared Library
//!
//! This crate contains the models, validation and pure history computation
//! used by the app crate and the WASM bindings.

pub mod errors;
pub mod history;
pub mod models;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use history::{compute_history, percentage_change, with_derived_metrics};
pub use models::{
    DisplayOrder, LocalImage, Report, ReportDraft, ReportHistoryEntry, ReportRecord, UserProfile,
};
pub use units::WeightUnit;
