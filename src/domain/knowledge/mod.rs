//! Knowledge module - rules that turn askable facts into reminders and
//! conclusions.
//!
//! Deliberately small: ordered conjunctions of conditions, no variables,
//! no recursion. The evaluation itself lives behind the `InferenceEngine` port.

mod knowledge_base;
mod rule;

pub use knowledge_base::KnowledgeBase;
pub use rule::{Condition, Derivation, Rule};

use thiserror::Error;

use crate::domain::foundation::AskableId;

/// Errors raised by the rule set itself.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Rules document is malformed: {0}")]
    Malformed(#[from] serde_yaml::Error),

    #[error("Rule #{index} yields an empty value")]
    EmptyValue { index: usize },

    #[error("Rule references unknown askable '{0}'")]
    UnknownAskable(AskableId),

    #[error("Condition '{condition}' cannot test '{askable}' = {fact}")]
    TypeMismatch {
        askable: AskableId,
        condition: &'static str,
        fact: String,
    },
}
