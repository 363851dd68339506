//! Answer and result value objects exchanged through shared state.

use serde::{Deserialize, Serialize};

use super::Question;

/// The user's raw answer to one question instance.
///
/// `values` is always a sequence, even for single choice, and goes on the
/// wire as-is under `<id>_response`. `question_seq` travels beside it under
/// `<id>_response_seq`, so an answer to an earlier asking of the same
/// askable is never mistaken for a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_seq: u64,
    pub values: Vec<String>,
}

impl Answer {
    pub fn for_question(question: &Question, values: Vec<String>) -> Self {
        Self {
            question_seq: question.seq,
            values,
        }
    }

    pub fn answers(&self, question: &Question) -> bool {
        self.question_seq == question.seq
    }
}

/// Final outputs of a run. Append-only, filled after evaluation finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub reminders: Vec<String>,
    pub conclusions: Vec<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty() && self.conclusions.is_empty()
    }
}

/// Consistent view of everything the presentation side may read.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub question: Question,
    pub results: ResultSet,
    pub done: bool,
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}
