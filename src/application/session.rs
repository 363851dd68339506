//! ConsultationSession - typed protocol over the shared state map.
//!
//! Opening a session seeds the map and hands out two handles. `EngineSide`
//! can only write engine-owned keys (`curr_question`, `reminders`,
//! `conclusions`, `error`, `done`); `FrontendSide` can only write
//! `<id>_response` and `<id>_response_seq` keys. Both may read everything. No key ever has two
//! writers, which is what makes the lock-free protocol safe.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::askable::AskableSpec;
use crate::domain::consultation::keys;
use crate::domain::consultation::{Answer, Question, ResultSet, SessionSnapshot, PLACEHOLDER_SEQ};
use crate::domain::foundation::AskableId;
use crate::ports::{SharedState, SharedStateError};

/// Errors raised by session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] SharedStateError),

    #[error("Value under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Required key '{0}' is missing")]
    Missing(&'static str),

    #[error("No question is open yet")]
    NoOpenQuestion,

    #[error("Question #{answered} was superseded by #{current}")]
    QuestionSuperseded { answered: u64, current: u64 },

    #[error("Question #{seq} ('{id}') was already answered")]
    AlreadyAnswered { id: AskableId, seq: u64 },

    #[error("Shared state closed while waiting")]
    Closed,
}

/// Entry point: seeds shared state and splits it into the two owned regions.
pub struct ConsultationSession;

impl ConsultationSession {
    /// Seeds the placeholder question, empty results and `done = false`.
    pub fn open(
        state: Arc<dyn SharedState>,
        welcome_text: &str,
    ) -> Result<(EngineSide, FrontendSide), SessionError> {
        let welcome = Question::welcome(welcome_text);
        let empty: Vec<String> = Vec::new();

        write(&*state, keys::CURR_QUESTION, &welcome)?;
        write(&*state, keys::REMINDERS, &empty)?;
        write(&*state, keys::CONCLUSIONS, &empty)?;
        write(&*state, keys::DONE, &false)?;

        let engine = EngineSide {
            state: Arc::clone(&state),
            next_seq: AtomicU64::new(PLACEHOLDER_SEQ + 1),
        };
        let frontend = FrontendSide { state, welcome };
        Ok((engine, frontend))
    }
}

/// Engine-owned half of the session.
pub struct EngineSide {
    state: Arc<dyn SharedState>,
    next_seq: AtomicU64,
}

impl EngineSide {
    /// Publishes a fresh question instance for `spec`. Returns what was published.
    pub fn publish_question(
        &self,
        spec: &AskableSpec,
        notice: Option<String>,
    ) -> Result<Question, SessionError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let question = match notice {
            Some(notice) => Question::from_spec(seq, spec).with_notice(notice),
            None => Question::from_spec(seq, spec),
        };
        write(&*self.state, keys::CURR_QUESTION, &question)?;
        tracing::debug!(askable = %question.id, seq, kind = %spec.kind, "Question published");
        Ok(question)
    }

    /// Blocks until the answer to exactly this question instance appears.
    ///
    /// An answer without a `<id>_response_seq` companion is accepted as-is.
    pub async fn await_answer(&self, question: &Question) -> Result<Vec<String>, SessionError> {
        let values_key = keys::response_key(&question.id);
        let seq_key = keys::response_seq_key(&question.id);
        wait_until(&*self.state, || {
            let [values, seq]: [Option<serde_json::Value>; 2] = self
                .state
                .get_many(&[values_key.as_str(), seq_key.as_str()])?
                .try_into()
                .map_err(|_| SharedStateError::Unavailable("short read from get_many".to_string()))?;

            let seq: Option<u64> = optional(&seq_key, seq)?;
            if seq.map_or(false, |seq| seq != question.seq) {
                return Ok(None);
            }
            optional(&values_key, values)
        })
        .await
    }

    pub fn publish_results(&self, results: &ResultSet) -> Result<(), SessionError> {
        write(&*self.state, keys::REMINDERS, &results.reminders)?;
        write(&*self.state, keys::CONCLUSIONS, &results.conclusions)
    }

    pub fn set_done(&self) -> Result<(), SessionError> {
        write(&*self.state, keys::DONE, &true)
    }

    /// Results first, flag last, so `done = true` always comes with full results.
    pub fn finish(&self, results: &ResultSet) -> Result<(), SessionError> {
        self.publish_results(results)?;
        self.set_done()
    }

    /// Records a failure and completes the session so the frontend cannot hang.
    pub fn fail(&self, message: &str, results: &ResultSet) -> Result<(), SessionError> {
        write(&*self.state, keys::ERROR, &message)?;
        self.finish(results)
    }

    pub fn current_snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        snapshot(&*self.state)
    }
}

/// Presentation-owned half of the session.
pub struct FrontendSide {
    state: Arc<dyn SharedState>,
    welcome: Question,
}

impl FrontendSide {
    /// The placeholder the session was seeded with.
    pub fn welcome(&self) -> &Question {
        &self.welcome
    }

    pub fn current_question(&self) -> Result<Question, SessionError> {
        read(&*self.state, keys::CURR_QUESTION)?.ok_or(SessionError::Missing(keys::CURR_QUESTION))
    }

    /// Writes the answer to `question`.
    ///
    /// Single-shot: fails for the placeholder, for a question that is no
    /// longer current, and for an instance that already has an answer.
    pub fn submit_answer(&self, question: &Question, values: Vec<String>) -> Result<Answer, SessionError> {
        if question.is_placeholder() {
            return Err(SessionError::NoOpenQuestion);
        }

        let current = self.current_question()?;
        if current.seq != question.seq {
            return Err(SessionError::QuestionSuperseded {
                answered: question.seq,
                current: current.seq,
            });
        }

        let seq_key = keys::response_seq_key(&question.id);
        let answered: Option<u64> = read(&*self.state, &seq_key)?;
        if answered == Some(question.seq) {
            return Err(SessionError::AlreadyAnswered {
                id: question.id.clone(),
                seq: question.seq,
            });
        }

        let answer = Answer::for_question(question, values);
        // Values first, instance last: a matching seq always comes with its values.
        write(&*self.state, &keys::response_key(&question.id), &answer.values)?;
        write(&*self.state, &seq_key, &answer.question_seq)?;
        tracing::debug!(askable = %question.id, seq = question.seq, "Answer submitted");
        Ok(answer)
    }

    /// Blocks until a question other than `after_seq` is current, or the run is done.
    pub async fn await_progress(&self, after_seq: u64) -> Result<SessionSnapshot, SessionError> {
        wait_until(&*self.state, || {
            let snapshot = snapshot(&*self.state)?;
            Ok((snapshot.done || snapshot.question.seq != after_seq).then_some(snapshot))
        })
        .await
    }

    pub fn current_snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        snapshot(&*self.state)
    }
}

fn read<T: DeserializeOwned>(state: &dyn SharedState, key: &str) -> Result<Option<T>, SessionError> {
    state.get(key)?.map(|value| decode(key, value)).transpose()
}

fn write<T: Serialize + ?Sized>(state: &dyn SharedState, key: &str, value: &T) -> Result<(), SessionError> {
    let value = serde_json::to_value(value).map_err(|source| SessionError::Corrupt {
        key: key.to_string(),
        source,
    })?;
    state.set(key, value)?;
    Ok(())
}

fn decode<T: DeserializeOwned>(key: &str, value: serde_json::Value) -> Result<T, SessionError> {
    serde_json::from_value(value).map_err(|source| SessionError::Corrupt {
        key: key.to_string(),
        source,
    })
}

fn snapshot(state: &dyn SharedState) -> Result<SessionSnapshot, SessionError> {
    const KEYS: [&str; 5] = [keys::CURR_QUESTION, keys::REMINDERS, keys::CONCLUSIONS, keys::DONE, keys::ERROR];
    let [question, reminders, conclusions, done, error]: [Option<serde_json::Value>; 5] = state
        .get_many(&KEYS)?
        .try_into()
        .map_err(|_| SharedStateError::Unavailable("short read from get_many".to_string()))?;

    let question: Question =
        optional(keys::CURR_QUESTION, question)?.ok_or(SessionError::Missing(keys::CURR_QUESTION))?;
    let reminders: Vec<String> = optional(keys::REMINDERS, reminders)?.unwrap_or_default();
    let conclusions: Vec<String> = optional(keys::CONCLUSIONS, conclusions)?.unwrap_or_default();
    let done: bool = optional(keys::DONE, done)?.unwrap_or(false);
    let error: Option<String> = optional(keys::ERROR, error)?;

    Ok(SessionSnapshot {
        question,
        results: ResultSet { reminders, conclusions },
        done,
        error,
    })
}

fn optional<T: DeserializeOwned>(key: &str, value: Option<serde_json::Value>) -> Result<Option<T>, SessionError> {
    value.map(|v| decode(key, v)).transpose()
}

/// Checks the condition after subscribing, then sleeps until the next write. No write between
/// the check and the wait can be missed.
async fn wait_until<T, F>(state: &dyn SharedState, mut check: F) -> Result<T, SessionError>
where
    F: FnMut() -> Result<Option<T>, SessionError>,
{
    let mut revisions = state.subscribe();
    loop {
        if let Some(found) = check()? {
            return Ok(found);
        }
        revisions.changed().await.map_err(|_| SessionError::Closed)?;
    }
}
