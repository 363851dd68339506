//! Inference Engine Port - the rule evaluator, treated as a black box.
//!
//! The engine calls back into a `FactProvider` for every fact it cannot
//! derive, and yields zero or more strings per derivation query.

use async_trait::async_trait;

use crate::domain::askable::TypedValue;
use crate::domain::foundation::AskableId;
use crate::domain::knowledge::{Derivation, KnowledgeError};

/// Errors raised while obtaining a fact from the user
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Unknown askable: {0}")]
    UnknownAskable(AskableId),

    #[error("Answer to '{askable}' is not a number: '{raw}'")]
    MalformedNumber { askable: AskableId, raw: String },

    #[error("Answer to '{0}' is empty")]
    EmptyAnswer(AskableId),

    #[error("No answer to '{askable}' within {waited_secs}s")]
    AnswerTimeout { askable: AskableId, waited_secs: u64 },

    #[error("Question channel unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by an inference engine run
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("Could not resolve fact: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Engine failure: {0}")]
    Internal(String),
}

/// Callback through which the engine obtains unknown facts.
#[async_trait]
pub trait FactProvider: Send + Sync {
    /// Obtains the value of `askable`, blocking the caller until it is known.
    async fn resolve(&self, askable: &AskableId) -> Result<TypedValue, ResolveError>;
}

/// Port for the rule evaluation engine
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Forgets every fact learned in a previous run. Idempotent.
    async fn reset_known_facts(&self) -> Result<(), EngineError>;

    /// Evaluates `derivation`, returning its solutions in evaluation order.
    async fn solve(
        &self,
        derivation: Derivation,
        facts: &dyn FactProvider,
    ) -> Result<Vec<String>, EngineError>;
}
