//! Presenter Port - the visual rendering side of the questionnaire.
//!
//! The interaction controller decides *what* is on screen; a presenter
//! decides how it looks.

use crate::domain::consultation::{InputWidget, Question, ResultSet};

/// Errors raised while rendering
#[derive(Debug, thiserror::Error)]
pub enum PresenterError {
    #[error("Render failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for rendering questions and results
pub trait Presenter: Send {
    /// Shows the seeded placeholder text. No input control is shown.
    fn show_welcome(&mut self, question: &Question) -> Result<(), PresenterError>;

    /// Replaces the prompt and rebuilds the input control.
    fn show_question(&mut self, question: &Question, widget: &InputWidget) -> Result<(), PresenterError>;

    /// Shows reminders and conclusions and turns the advance action into "Finish".
    fn show_results(&mut self, results: &ResultSet) -> Result<(), PresenterError>;

    /// Shows why the run ended early, plus whatever results exist.
    fn show_failure(&mut self, message: &str, results: &ResultSet) -> Result<(), PresenterError>;

    /// Local input that could not be turned into a selection. Nothing was submitted.
    fn show_input_error(&mut self, message: &str) -> Result<(), PresenterError>;

    /// Called once when the user finishes.
    fn show_finished(&mut self) -> Result<(), PresenterError>;
}
