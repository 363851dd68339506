//! Rules, conditions and the derivations they feed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::KnowledgeError;
use crate::domain::askable::TypedValue;
use crate::domain::foundation::AskableId;

/// The two derivation queries a run evaluates, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    DailyReminder,
    Conclusion,
}

impl Derivation {
    pub const ALL: [Derivation; 2] = [Derivation::DailyReminder, Derivation::Conclusion];
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Derivation::DailyReminder => "daily_reminder",
            Derivation::Conclusion => "conclusion",
        };
        write!(f, "{}", s)
    }
}

/// A test over one askable's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Single answer equals `value`.
    Is { askable: AskableId, value: String },
    IsNot { askable: AskableId, value: String },
    /// Multi-choice answer contains `value`.
    Includes { askable: AskableId, value: String },
    AtLeast { askable: AskableId, value: f64 },
    Below { askable: AskableId, value: f64 },
}

impl Condition {
    pub fn askable(&self) -> &AskableId {
        match self {
            Condition::Is { askable, .. }
            | Condition::IsNot { askable, .. }
            | Condition::Includes { askable, .. }
            | Condition::AtLeast { askable, .. }
            | Condition::Below { askable, .. } => askable,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Condition::Is { .. } => "is",
            Condition::IsNot { .. } => "is_not",
            Condition::Includes { .. } => "includes",
            Condition::AtLeast { .. } => "at_least",
            Condition::Below { .. } => "below",
        }
    }

    /// Tests the condition against a known fact.
    pub fn holds(&self, fact: &TypedValue) -> Result<bool, KnowledgeError> {
        let held = match (self, fact) {
            (Condition::Is { value, .. }, fact) => matches_exactly(value, fact),
            (Condition::IsNot { value, .. }, fact) => !matches_exactly(value, fact),
            (Condition::Includes { value, .. }, TypedValue::Tokens(tokens)) => {
                tokens.iter().any(|t| t == value)
            }
            (Condition::Includes { value, .. }, TypedValue::Token(token)) => token == value,
            (Condition::AtLeast { value, .. }, TypedValue::Number(n)) => n >= value,
            (Condition::Below { value, .. }, TypedValue::Number(n)) => n < value,
            _ => {
                return Err(KnowledgeError::TypeMismatch {
                    askable: self.askable().clone(),
                    condition: self.name(),
                    fact: fact.to_string(),
                })
            }
        };
        Ok(held)
    }
}

fn matches_exactly(expected: &str, fact: &TypedValue) -> bool {
    match fact {
        TypedValue::Token(token) => token == expected,
        TypedValue::Tokens(tokens) => tokens.len() == 1 && tokens[0] == expected,
        TypedValue::Number(n) => expected.trim().parse::<f64>().map_or(false, |e| e == *n),
    }
}

/// `derive` yields `value` when every condition in `when` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub derive: Derivation,
    pub value: String,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub when: Vec<Condition>,
}
