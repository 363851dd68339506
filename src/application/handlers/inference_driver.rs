//! InferenceDriver - runs the engine end to end and publishes the outcome.

use std::sync::Arc;
use thiserror::Error;

use super::QuestionBroker;
use crate::application::session::{EngineSide, SessionError};
use crate::domain::consultation::ResultSet;
use crate::domain::foundation::{DomainError, ErrorCode, RunId, Timestamp};
use crate::domain::knowledge::Derivation;
use crate::ports::{EngineError, InferenceEngine, ResolveError};

/// Errors that end an inference run
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Could not publish run outcome: {0}")]
    Session(#[from] SessionError),
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: RunId,
    pub results: ResultSet,
    pub questions_asked: usize,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
}

/// Drives one evaluation of every derivation, with the broker as fact source.
pub struct InferenceDriver {
    engine: Arc<dyn InferenceEngine>,
    broker: Arc<QuestionBroker>,
    session: Arc<EngineSide>,
}

impl InferenceDriver {
    pub fn new(engine: Arc<dyn InferenceEngine>, broker: Arc<QuestionBroker>, session: Arc<EngineSide>) -> Self {
        Self {
            engine,
            broker,
            session,
        }
    }

    /// Resets known facts, evaluates reminders then conclusions, and
    /// publishes results followed by the completion flag.
    ///
    /// On failure the error is published and `done` is still set, with
    /// empty results, before the error is returned.
    pub async fn run(&self) -> Result<RunReport, DriverError> {
        let run_id = RunId::new();
        let started_at = Timestamp::now();
        let asked_before = self.broker.questions_asked();
        tracing::info!(%run_id, "Inference run started");

        match self.evaluate().await {
            Ok(results) => {
                self.session.finish(&results)?;
                let report = RunReport {
                    run_id,
                    questions_asked: self.broker.questions_asked() - asked_before,
                    results,
                    started_at,
                    finished_at: Timestamp::now(),
                };
                tracing::info!(
                    %run_id,
                    reminders = report.results.reminders.len(),
                    conclusions = report.results.conclusions.len(),
                    questions = report.questions_asked,
                    "Inference run finished"
                );
                Ok(report)
            }
            Err(err) => {
                let failure = describe(&err);
                tracing::error!(%run_id, error = %failure, "Inference run failed");
                if let Err(publish_err) = self.session.fail(&failure.to_string(), &ResultSet::new()) {
                    tracing::error!(%run_id, error = %publish_err, "Could not publish failure");
                }
                Err(err.into())
            }
        }
    }

    async fn evaluate(&self) -> Result<ResultSet, EngineError> {
        self.engine.reset_known_facts().await?;

        let mut results = ResultSet::new();
        for derivation in Derivation::ALL {
            let solutions = self.engine.solve(derivation, self.broker.as_ref()).await?;
            match derivation {
                Derivation::DailyReminder => results.reminders.extend(solutions),
                Derivation::Conclusion => results.conclusions.extend(solutions),
            }
        }
        Ok(results)
    }
}

/// Coarse, user-facing form of an engine failure.
fn describe(err: &EngineError) -> DomainError {
    let code = match err {
        EngineError::Resolve(ResolveError::UnknownAskable(_)) => ErrorCode::UnknownAskable,
        EngineError::Resolve(ResolveError::MalformedNumber { .. }) => ErrorCode::MalformedNumber,
        EngineError::Resolve(ResolveError::EmptyAnswer(_)) => ErrorCode::EmptyAnswer,
        EngineError::Resolve(ResolveError::AnswerTimeout { .. }) => ErrorCode::AnswerTimeout,
        EngineError::Resolve(ResolveError::Unavailable(_)) => ErrorCode::SessionClosed,
        EngineError::Knowledge(_) | EngineError::Internal(_) => ErrorCode::EngineFailure,
    };
    DomainError::new(code, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySharedState, RuleEngine};
    use crate::application::handlers::BrokerConfig;
    use crate::application::session::{ConsultationSession, FrontendSide};
    use crate::domain::askable::AskableCatalog;
    use crate::domain::knowledge::KnowledgeBase;
    use crate::ports::FactProvider;
    use async_trait::async_trait;

    const ASKABLES: &str = r#"{"askables": {
        "skin_type": {"text": "Skin type?", "type": "single_choice",
                      "options": [{"id": "dry", "text": "Dry"}, {"id": "oily", "text": "Oily"}]}
    }}"#;

    fn driver_for(rules: &str, engine: Option<Arc<dyn InferenceEngine>>) -> (InferenceDriver, FrontendSide) {
        let state = Arc::new(InMemorySharedState::new());
        let (engine_side, frontend) = ConsultationSession::open(state, "Welcome").unwrap();
        let engine_side = Arc::new(engine_side);
        let catalog = Arc::new(AskableCatalog::from_json_str(ASKABLES).unwrap());
        let broker = Arc::new(QuestionBroker::new(catalog, engine_side.clone(), BrokerConfig::default()));
        let engine: Arc<dyn InferenceEngine> = match engine {
            Some(engine) => engine,
            None => Arc::new(RuleEngine::new(KnowledgeBase::from_yaml_str(rules).unwrap())),
        };
        (InferenceDriver::new(engine, broker, engine_side), frontend)
    }

    #[tokio::test]
    async fn run_without_askables_publishes_results_and_done() {
        let rules = "rules:\n  - derive: daily_reminder\n    value: Drink water\n  - derive: conclusion\n    value: keep_routine\n";
        let (driver, frontend) = driver_for(rules, None);

        let report = driver.run().await.unwrap();
        assert_eq!(report.results.reminders, vec!["Drink water".to_string()]);
        assert_eq!(report.results.conclusions, vec!["keep_routine".to_string()]);
        assert_eq!(report.questions_asked, 0);
        assert!(report.finished_at >= report.started_at);

        let snapshot = frontend.current_snapshot().unwrap();
        assert!(snapshot.done);
        assert_eq!(snapshot.results, report.results);
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn unknown_askable_still_sets_done_with_error() {
        let rules = "rules:\n  - derive: conclusion\n    value: x\n    when:\n      - is: { askable: budget, value: low }\n";
        let (driver, frontend) = driver_for(rules, None);

        let err = driver.run().await.unwrap_err();
        assert!(matches!(err, DriverError::Engine(EngineError::Resolve(ResolveError::UnknownAskable(_)))));

        let snapshot = frontend.current_snapshot().unwrap();
        assert!(snapshot.done);
        assert!(snapshot.results.is_empty());
        assert!(snapshot.error.unwrap().starts_with("[UNKNOWN_ASKABLE]"));
    }

    /// Runs the driver once against a fresh session, answering every question with `answer`.
    async fn run_answering(engine: Arc<RuleEngine>, answer: &'static str) -> RunReport {
        let state = Arc::new(InMemorySharedState::new());
        let (engine_side, frontend) = ConsultationSession::open(state, "Welcome").unwrap();
        let engine_side = Arc::new(engine_side);
        let catalog = Arc::new(AskableCatalog::from_json_str(ASKABLES).unwrap());
        let broker = Arc::new(QuestionBroker::new(catalog, engine_side.clone(), BrokerConfig::default()));
        let driver = InferenceDriver::new(engine, broker, engine_side);

        let user = tokio::spawn(async move {
            let mut last_seq = crate::domain::consultation::PLACEHOLDER_SEQ;
            loop {
                let snapshot = frontend.await_progress(last_seq).await.unwrap();
                if snapshot.done {
                    return;
                }
                last_seq = snapshot.question.seq;
                frontend.submit_answer(&snapshot.question, vec![answer.to_string()]).unwrap();
            }
        });

        let report = driver.run().await.unwrap();
        user.await.unwrap();
        report
    }

    #[tokio::test]
    async fn rerun_on_same_engine_asks_again() {
        let rules = "rules:\n  - derive: conclusion\n    value: use_moisturizer\n    when:\n      - is: { askable: skin_type, value: dry }\n";
        let engine = Arc::new(RuleEngine::new(KnowledgeBase::from_yaml_str(rules).unwrap()));

        let first = run_answering(engine.clone(), "dry").await;
        let second = run_answering(engine.clone(), "dry").await;

        assert_eq!(first.questions_asked, 1);
        assert_eq!(second.questions_asked, 1);
        assert_eq!(first.results, second.results);
        assert_eq!(second.results.conclusions, vec!["use_moisturizer".to_string()]);

        // A stale memo would have answered "dry" without asking.
        let third = run_answering(engine, "oily").await;
        assert_eq!(third.questions_asked, 1);
        assert!(third.results.conclusions.is_empty());
    }

    struct BrokenEngine;

    #[async_trait]
    impl InferenceEngine for BrokenEngine {
        async fn reset_known_facts(&self) -> Result<(), EngineError> {
            Ok(())
        }

        async fn solve(&self, _derivation: Derivation, _facts: &dyn FactProvider) -> Result<Vec<String>, EngineError> {
            Err(EngineError::Internal("knowledge base did not load".to_string()))
        }
    }

    #[tokio::test]
    async fn engine_failure_is_surfaced_through_error_key() {
        let (driver, frontend) = driver_for("", Some(Arc::new(BrokenEngine)));

        assert!(driver.run().await.is_err());

        let snapshot = frontend.current_snapshot().unwrap();
        assert!(snapshot.done);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("[ENGINE_FAILURE] Engine failure: knowledge base did not load")
        );
    }
}
