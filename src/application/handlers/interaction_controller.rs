//! InteractionController - presentation-side state machine.
//!
//! Reads the current question, has it rendered, buffers the user's
//! selection, publishes the answer on "advance", and waits for either the
//! next question or the completion flag.

use thiserror::Error;

use crate::application::session::{FrontendSide, SessionError};
use crate::domain::consultation::{InputWidget, InteractionPhase, Question, ResultSet, PLACEHOLDER_SEQ};
use crate::domain::foundation::{StateMachine, ValidationError};
use crate::ports::{Presenter, PresenterError};

/// Errors raised by the controller
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Presenter(#[from] PresenterError),

    #[error("Invalid phase change: {0}")]
    Transition(#[from] ValidationError),

    #[error("Cannot advance while {0}")]
    CannotAdvance(InteractionPhase),

    #[error("Question #{0} has no input control")]
    MissingWidget(u64),
}

/// What the controller moved to after an advance.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerStep {
    /// A new question is on screen.
    Asking(Question),
    /// The run completed; results (and a failure message, if any) are on screen.
    Done { results: ResultSet, error: Option<String> },
    /// The user finished; the caller should tear down.
    Exit,
}

pub struct InteractionController<P: Presenter> {
    frontend: FrontendSide,
    presenter: P,
    phase: InteractionPhase,
    question: Question,
    widget: Option<InputWidget>,
    selection: Vec<String>,
}

impl<P: Presenter> InteractionController<P> {
    pub fn new(frontend: FrontendSide, presenter: P) -> Self {
        let question = frontend.welcome().clone();
        Self {
            frontend,
            presenter,
            phase: InteractionPhase::Welcome,
            question,
            widget: None,
            selection: Vec::new(),
        }
    }

    /// First render: the seeded placeholder, without an input control.
    pub fn start(&mut self) -> Result<(), ControllerError> {
        self.presenter.show_welcome(&self.question)?;
        Ok(())
    }

    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    /// The question on screen (the placeholder until the first real one).
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Input control of the question on screen, if it takes input.
    pub fn widget(&self) -> Option<&InputWidget> {
        self.widget.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Buffers the user's selection for the question on screen.
    ///
    /// Ignored (returns false) outside `Asking`: there is nothing to answer.
    pub fn select(&mut self, values: Vec<String>) -> bool {
        if !self.phase.accepts_answer() {
            tracing::debug!(phase = %self.phase, "Selection ignored");
            return false;
        }
        self.selection = values;
        true
    }

    /// The user's "advance" action.
    ///
    /// - `Welcome`: waits for the first real question (nothing is written).
    /// - `Asking`: publishes the buffered selection, then waits.
    /// - `Done`: finishes; the caller should exit.
    pub async fn advance(&mut self) -> Result<ControllerStep, ControllerError> {
        match self.phase {
            InteractionPhase::Welcome => self.await_next(PLACEHOLDER_SEQ).await,
            InteractionPhase::Asking => {
                let values = std::mem::take(&mut self.selection);
                self.frontend.submit_answer(&self.question, values)?;
                let answered = self.question.seq;
                self.await_next(answered).await
            }
            InteractionPhase::Done => {
                self.move_to(InteractionPhase::Finished)?;
                self.presenter.show_finished()?;
                Ok(ControllerStep::Exit)
            }
            phase @ (InteractionPhase::Advancing | InteractionPhase::Finished) => {
                Err(ControllerError::CannotAdvance(phase))
            }
        }
    }

    async fn await_next(&mut self, after_seq: u64) -> Result<ControllerStep, ControllerError> {
        self.move_to(InteractionPhase::Advancing)?;
        let snapshot = self.frontend.await_progress(after_seq).await?;

        if snapshot.done {
            self.move_to(InteractionPhase::Done)?;
            self.widget = None;
            match &snapshot.error {
                Some(message) => self.presenter.show_failure(message, &snapshot.results)?,
                None => self.presenter.show_results(&snapshot.results)?,
            }
            return Ok(ControllerStep::Done {
                results: snapshot.results,
                error: snapshot.error,
            });
        }

        let question = snapshot.question;
        let widget = question.widget().ok_or(ControllerError::MissingWidget(question.seq))?;
        self.move_to(InteractionPhase::Asking)?;
        self.presenter.show_question(&question, &widget)?;
        self.selection.clear();
        self.widget = Some(widget);
        self.question = question.clone();
        Ok(ControllerStep::Asking(question))
    }

    fn move_to(&mut self, target: InteractionPhase) -> Result<(), ControllerError> {
        self.phase = self.phase.transition_to(target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySharedState;
    use crate::application::session::{ConsultationSession, EngineSide};
    use crate::domain::askable::{AskableOption, AskableSpec, QuestionKind};
    use crate::domain::foundation::AskableId;
    use std::sync::Arc;

    /// Records what was rendered, in order.
    #[derive(Default)]
    struct RecordingPresenter {
        frames: Vec<String>,
    }

    impl Presenter for RecordingPresenter {
        fn show_welcome(&mut self, question: &Question) -> Result<(), PresenterError> {
            self.frames.push(format!("welcome:{}", question.text));
            Ok(())
        }

        fn show_question(&mut self, question: &Question, widget: &InputWidget) -> Result<(), PresenterError> {
            let control = match widget {
                InputWidget::ExclusiveChoice { .. } => "exclusive",
                InputWidget::MultiSelect { .. } => "multi",
                InputWidget::Freeform { .. } => "freeform",
            };
            self.frames.push(format!("question:{}:{}", question.id, control));
            Ok(())
        }

        fn show_results(&mut self, results: &ResultSet) -> Result<(), PresenterError> {
            self.frames.push(format!("results:{}", results.conclusions.join(",")));
            Ok(())
        }

        fn show_failure(&mut self, message: &str, _results: &ResultSet) -> Result<(), PresenterError> {
            self.frames.push(format!("failure:{}", message));
            Ok(())
        }

        fn show_input_error(&mut self, message: &str) -> Result<(), PresenterError> {
            self.frames.push(format!("input_error:{}", message));
            Ok(())
        }

        fn show_finished(&mut self) -> Result<(), PresenterError> {
            self.frames.push("finished".to_string());
            Ok(())
        }
    }

    fn spec(id: &str, kind: QuestionKind) -> AskableSpec {
        let options = if kind.is_choice() {
            vec![AskableOption::new("a", "A"), AskableOption::new("b", "B")]
        } else {
            vec![]
        };
        AskableSpec::new(AskableId::new(id).unwrap(), format!("{}?", id), kind, options, None).unwrap()
    }

    fn setup() -> (Arc<InMemorySharedState>, EngineSide, InteractionController<RecordingPresenter>) {
        let state = Arc::new(InMemorySharedState::new());
        let (engine, frontend) = ConsultationSession::open(state.clone(), "Hello").unwrap();
        let controller = InteractionController::new(frontend, RecordingPresenter::default());
        (state, engine, controller)
    }

    #[tokio::test]
    async fn welcome_advance_writes_nothing_and_shows_first_question() {
        let (state, engine, mut controller) = setup();
        controller.start().unwrap();
        assert!(!controller.select(vec!["ignored".to_string()]));

        engine.publish_question(&spec("skin_type", QuestionKind::SingleChoice), None).unwrap();
        let step = controller.advance().await.unwrap();

        assert!(matches!(step, ControllerStep::Asking(ref q) if q.id.as_str() == "skin_type"));
        assert_eq!(controller.phase(), InteractionPhase::Asking);
        assert!(!state.keys().iter().any(|k| k.contains("_response")));
        assert_eq!(
            controller.presenter().frames,
            vec!["welcome:Hello".to_string(), "question:skin_type:exclusive".to_string()]
        );
    }

    #[tokio::test]
    async fn asking_advance_submits_selection_and_waits_for_next() {
        let (_state, engine, mut controller) = setup();
        let first = engine.publish_question(&spec("skin_type", QuestionKind::SingleChoice), None).unwrap();
        controller.advance().await.unwrap();

        assert!(controller.select(vec!["b".to_string()]));
        let engine = Arc::new(engine);
        let worker = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                let raw = engine.await_answer(&first).await.unwrap();
                engine.publish_question(&spec("concerns", QuestionKind::MultiChoice), None).unwrap();
                raw
            })
        };

        let step = controller.advance().await.unwrap();
        assert_eq!(worker.await.unwrap(), vec!["b".to_string()]);
        assert!(matches!(step, ControllerStep::Asking(ref q) if q.id.as_str() == "concerns"));
        assert!(matches!(controller.widget(), Some(InputWidget::MultiSelect { .. })));
    }

    #[tokio::test]
    async fn done_shows_results_then_finish_exits() {
        let (_state, engine, mut controller) = setup();
        let results = ResultSet {
            reminders: vec![],
            conclusions: vec!["use_moisturizer".to_string()],
        };
        engine.finish(&results).unwrap();

        let step = controller.advance().await.unwrap();
        assert_eq!(step, ControllerStep::Done { results, error: None });
        assert_eq!(controller.phase(), InteractionPhase::Done);
        assert!(controller.widget().is_none());

        assert_eq!(controller.advance().await.unwrap(), ControllerStep::Exit);
        assert_eq!(controller.phase(), InteractionPhase::Finished);
        assert_eq!(controller.presenter().frames.last().map(String::as_str), Some("finished"));

        let err = controller.advance().await.unwrap_err();
        assert!(matches!(err, ControllerError::CannotAdvance(InteractionPhase::Finished)));
    }

    #[tokio::test]
    async fn failure_is_rendered_instead_of_results() {
        let (_state, engine, mut controller) = setup();
        engine.fail("[ANSWER_TIMEOUT] too slow", &ResultSet::new()).unwrap();

        let step = controller.advance().await.unwrap();
        assert!(matches!(step, ControllerStep::Done { error: Some(_), .. }));
        assert_eq!(
            controller.presenter().frames.last().map(String::as_str),
            Some("failure:[ANSWER_TIMEOUT] too slow")
        );
    }

    #[tokio::test]
    async fn number_question_gets_freeform_widget() {
        let (_state, engine, mut controller) = setup();
        engine.publish_question(&spec("age", QuestionKind::Number), None).unwrap();
        controller.advance().await.unwrap();
        assert!(matches!(controller.widget(), Some(InputWidget::Freeform { default: None })));
    }
}
