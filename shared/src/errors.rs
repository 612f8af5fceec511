//! Error types for the Progress Tracker application

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to the report and dashboard screens.
///
/// Every backend failure is converted into one of these kinds at the service
/// boundary, so presentation code never sees a transport or storage error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Image picker error: {0}")]
    Picker(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Persist error: {0}")]
    Persist(String),

    #[error("A submission is already in flight")]
    SubmissionInFlight,
}

impl ReportError {
    /// Stable machine-readable code, also used as the metrics label
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::Validation(_) => "VALIDATION_ERROR",
            ReportError::Picker(_) => "PICKER_ERROR",
            ReportError::Upload(_) => "UPLOAD_ERROR",
            ReportError::NotAuthenticated => "NOT_AUTHENTICATED",
            ReportError::Fetch(_) => "FETCH_ERROR",
            ReportError::Persist(_) => "PERSIST_ERROR",
            ReportError::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
        }
    }

    /// Only a missing user is fatal to the current screen.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, ReportError::NotAuthenticated)
    }

    /// User-facing text shown inline on the screen
    pub fn inline_message(&self) -> String {
        match self {
            ReportError::Validation(msg) => msg.clone(),
            ReportError::Picker(_) => "Could not open your photos. Please try again.".to_string(),
            ReportError::Upload(_) => {
                "Uploading your photos failed. Your report was not saved, please try again."
                    .to_string()
            }
            ReportError::NotAuthenticated => "Please sign in to continue.".to_string(),
            ReportError::Fetch(_) => {
                "Could not load your reports. Pull to refresh to try again.".to_string()
            }
            ReportError::Persist(_) => {
                "Saving your report failed. Please try again.".to_string()
            }
            ReportError::SubmissionInFlight => "Your report is still being submitted.".to_string(),
        }
    }
}

/// Non-blocking message rendered next to the control that caused it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineMessage {
    pub code: String,
    pub text: String,
    pub requires_sign_in: bool,
}

impl From<&ReportError> for InlineMessage {
    fn from(err: &ReportError) -> Self {
        Self {
            code: err.code().to_string(),
            text: err.inline_message(),
            requires_sign_in: err.requires_sign_in(),
        }
    }
}

/// Authentication error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("No signed-in user")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl From<AuthError> for ReportError {
    fn from(_: AuthError) -> Self {
        ReportError::NotAuthenticated
    }
}
