//! QuestionBroker - turns the engine's "I need fact X" into a question for
//! the user, synchronously from the engine's point of view.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::application::session::{EngineSide, SessionError};
use crate::domain::askable::{AskableCatalog, AskableSpec, DecodeError, TypedValue};
use crate::domain::consultation::Question;
use crate::domain::foundation::AskableId;
use crate::ports::{FactProvider, ResolveError};

/// Broker tuning.
#[derive(Debug, Clone, Default)]
pub struct BrokerConfig {
    /// Longest wait for a single answer. `None` waits indefinitely.
    pub answer_timeout: Option<Duration>,
    /// How many times an unusable answer is re-asked before failing the run.
    pub max_reasks: u32,
}

/// Publishes questions and blocks until they are answered.
pub struct QuestionBroker {
    catalog: Arc<AskableCatalog>,
    session: Arc<EngineSide>,
    config: BrokerConfig,
    asked: AtomicUsize,
}

impl QuestionBroker {
    pub fn new(catalog: Arc<AskableCatalog>, session: Arc<EngineSide>, config: BrokerConfig) -> Self {
        Self {
            catalog,
            session,
            config,
            asked: AtomicUsize::new(0),
        }
    }

    /// Total question instances published by this broker.
    pub fn questions_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }

    /// Asks the user for `askable` and decodes the answer per its kind.
    ///
    /// One publication and one blocking wait per attempt; an unusable answer
    /// is re-asked with a notice until `max_reasks` is spent.
    pub async fn resolve(&self, askable: &AskableId) -> Result<TypedValue, ResolveError> {
        let spec = self
            .catalog
            .get(askable)
            .ok_or_else(|| ResolveError::UnknownAskable(askable.clone()))?;

        let mut notice = None;
        let mut reasks = 0;
        loop {
            let question = self.session.publish_question(spec, notice.take())?;
            self.asked.fetch_add(1, Ordering::SeqCst);

            let raw = self.wait_for_answer(&question).await?;
            let error = match spec.kind.decode(&raw) {
                Ok(value) => {
                    tracing::info!(askable = %askable, seq = question.seq, value = %value, "Fact resolved");
                    return Ok(value);
                }
                Err(error) => error,
            };

            if reasks >= self.config.max_reasks {
                return Err(into_resolve_error(askable, error));
            }
            reasks += 1;
            tracing::warn!(askable = %askable, attempt = reasks, error = %error, "Re-asking after unusable answer");
            notice = Some(reask_notice(spec, &error));
        }
    }

    async fn wait_for_answer(&self, question: &Question) -> Result<Vec<String>, ResolveError> {
        match self.config.answer_timeout {
            None => Ok(self.session.await_answer(question).await?),
            Some(limit) => tokio::time::timeout(limit, self.session.await_answer(question))
                .await
                .map_err(|_| ResolveError::AnswerTimeout {
                    askable: question.id.clone(),
                    waited_secs: limit.as_secs(),
                })?
                .map_err(ResolveError::from),
        }
    }
}

fn into_resolve_error(askable: &AskableId, error: DecodeError) -> ResolveError {
    match error {
        DecodeError::EmptyAnswer => ResolveError::EmptyAnswer(askable.clone()),
        DecodeError::MalformedNumber { raw } => ResolveError::MalformedNumber {
            askable: askable.clone(),
            raw,
        },
    }
}

fn reask_notice(spec: &AskableSpec, error: &DecodeError) -> String {
    match error {
        DecodeError::MalformedNumber { raw } => format!("'{}' is not a number. Please enter a number.", raw),
        DecodeError::EmptyAnswer => format!("An answer to \"{}\" is required.", spec.text),
    }
}

impl From<SessionError> for ResolveError {
    fn from(err: SessionError) -> Self {
        ResolveError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl FactProvider for QuestionBroker {
    async fn resolve(&self, askable: &AskableId) -> Result<TypedValue, ResolveError> {
        QuestionBroker::resolve(self, askable).await
    }
}
