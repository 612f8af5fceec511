//! Report screen
//!
//! Owns the draft being composed, the history list and the inline message.
//! State lives behind `Arc<Mutex<_>>`; a submission that outlives the
//! screen holds only a `Weak` handle and drops its results once the screen
//! is gone.

use crate::ports::{ImagePicker, PickOutcome};
use crate::screens::view::ReportListItem;
use crate::services::ReportService;
use progress_tracker_shared::{
    InlineMessage, ReportDraft, ReportError, ReportHistoryEntry, WeightUnit,
};
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Everything the report screen renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportScreenState {
    pub draft: ReportDraft,
    /// Text typed into the custom-field input, not yet added
    pub custom_field_input: String,
    pub history: Vec<ReportHistoryEntry>,
    /// Submit control is disabled while this is set
    pub submitting: bool,
    pub message: Option<InlineMessage>,
}

impl ReportScreenState {
    fn show_error(&mut self, err: &ReportError) {
        self.message = Some(InlineMessage::from(err));
    }
}

pub struct ReportScreen {
    state: Arc<Mutex<ReportScreenState>>,
    service: ReportService,
    picker: Arc<dyn ImagePicker>,
    weight_unit: WeightUnit,
}

impl ReportScreen {
    pub fn new(
        service: ReportService,
        picker: Arc<dyn ImagePicker>,
        weight_unit: WeightUnit,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(ReportScreenState::default())),
            service,
            picker,
            weight_unit,
        }
    }

    /// Create the screen with an empty draft and load the history
    ///
    /// A failed history load is shown inline; the screen stays usable.
    pub async fn mount(
        service: ReportService,
        picker: Arc<dyn ImagePicker>,
        weight_unit: WeightUnit,
    ) -> Self {
        let screen = Self::new(service, picker, weight_unit);
        if let Err(err) = screen.refresh_history().await {
            debug!(error = %err, "Initial history load failed");
        }
        screen
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> ReportScreenState {
        self.state.lock().await.clone()
    }

    pub async fn can_submit(&self) -> bool {
        !self.state.lock().await.submitting
    }

    /// History rows in display order
    pub async fn history_items(&self) -> Vec<ReportListItem> {
        self.state
            .lock()
            .await
            .history
            .iter()
            .map(|entry| ReportListItem::from_entry(entry, self.weight_unit))
            .collect()
    }

    /// Ask the picker for an image and attach it to the draft
    ///
    /// Beyond the image cap the pick is silently dropped. A cancel changes
    /// nothing. A picker failure is shown inline and returned.
    pub async fn select_image(&self) -> Result<(), ReportError> {
        match self.picker.pick().await {
            Ok(PickOutcome::Picked(image)) => {
                let mut state = self.state.lock().await;
                if !state.draft.add_image(image) {
                    debug!("Image limit reached, ignoring picked image");
                }
                Ok(())
            }
            Ok(PickOutcome::Cancelled) => {
                info!("User cancelled image picker");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Image picker failed");
                let err = ReportError::from(err);
                self.state.lock().await.show_error(&err);
                Err(err)
            }
        }
    }

    pub async fn set_weight(&self, text: impl Into<String>) {
        self.state.lock().await.draft.set_weight(text);
    }

    pub async fn set_custom_field_input(&self, text: impl Into<String>) {
        self.state.lock().await.custom_field_input = text.into();
    }

    /// Add the pending input as a custom field; the input is cleared only
    /// when the field was accepted
    pub async fn commit_custom_field(&self) -> bool {
        let mut state = self.state.lock().await;
        let input = std::mem::take(&mut state.custom_field_input);
        if state.draft.add_custom_field(&input) {
            true
        } else {
            state.custom_field_input = input;
            false
        }
    }

    pub async fn add_custom_field(&self, text: &str) -> bool {
        self.state.lock().await.draft.add_custom_field(text)
    }

    pub async fn remove_custom_field(&self, index: usize) {
        self.state.lock().await.draft.remove_custom_field(index);
    }

    /// Re-read the history from the database
    pub async fn refresh_history(&self) -> Result<(), ReportError> {
        let result = self.service.fetch_current_history().await;
        let mut state = self.state.lock().await;
        match result {
            Ok(history) => {
                state.history = history;
                Ok(())
            }
            Err(err) => {
                state.show_error(&err);
                Err(err)
            }
        }
    }

    /// Submit the draft and wait for the pipeline and the history refresh
    ///
    /// The pipeline runs on its own task, so dropping this future does not
    /// leave the screen stuck in the submitting state.
    pub async fn submit(&self) -> Result<String, ReportError> {
        let handle = self.spawn_submit().await?;
        match handle.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => Err(ReportError::Persist(format!("submission task cancelled: {err}"))),
        }
    }

    /// Submit in the background
    ///
    /// The task keeps running if the screen is dropped, but it no longer
    /// touches the screen's state.
    pub async fn spawn_submit(
        &self,
    ) -> Result<JoinHandle<Result<String, ReportError>>, ReportError> {
        let draft = self.begin_submission().await?;
        let state = Arc::downgrade(&self.state);
        let service = self.service.clone();
        Ok(tokio::spawn(finish_submission(state, service, draft)))
    }

    /// Mark the screen as submitting and take a copy of the draft
    async fn begin_submission(&self) -> Result<ReportDraft, ReportError> {
        let mut state = self.state.lock().await;
        if state.submitting {
            debug!("Submit ignored, a submission is already in flight");
            return Err(ReportError::SubmissionInFlight);
        }
        state.submitting = true;
        state.message = None;
        Ok(state.draft.clone())
    }
}

/// Run the pipeline, then refresh history strictly after the write
///
/// On success only the submitted content leaves the draft; edits made while
/// the upload was running stay. A failed submission leaves the draft alone so
/// it can be retried without re-entering anything.
async fn finish_submission(
    state: Weak<Mutex<ReportScreenState>>,
    service: ReportService,
    draft: ReportDraft,
) -> Result<String, ReportError> {
    let result = service.submit(&draft).await;

    let history = match &result {
        Ok(_) if state.strong_count() > 0 => Some(service.fetch_current_history().await),
        _ => None,
    };

    let Some(screen) = state.upgrade() else {
        debug!("Report screen gone, dropping submission result");
        return result;
    };
    let mut state = screen.lock().await;
    state.submitting = false;

    match &result {
        Ok(_) => {
            state.draft.discard_submitted(&draft);
            match history {
                Some(Ok(history)) => state.history = history,
                Some(Err(err)) => state.show_error(&err),
                None => {}
            }
        }
        Err(err) => state.show_error(err),
    }
    result
}
