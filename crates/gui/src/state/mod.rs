pub mod form;
pub mod settings;
pub mod submission;

pub use form::{BlockDimensions, Field, FormError, FormEvent, FormState, OrderDraft};
pub use settings::{AppSettings, BackgroundSettings, Language, PreviewSettings};
pub use submission::SubmissionState;

/// Combined application state
pub struct AppState {
    pub form: FormState,
    pub submission: SubmissionState,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
}

impl AppState {
    pub fn new(settings: AppSettings, submission: SubmissionState) -> Self {
        Self {
            form: FormState::default(),
            submission,
            settings,
            show_settings_window: false,
        }
    }

    /// Apply a batch of field edits collected during one UI pass
    pub fn apply_edits(&mut self, events: Vec<FormEvent>) -> usize {
        events
            .into_iter()
            .map(|e| self.form.apply(e))
            .filter(Result::is_ok)
            .count()
    }

    pub fn submit(&mut self) -> bool {
        self.submission.submit(&self.form)
    }
}
