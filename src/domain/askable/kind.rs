//! QuestionKind - the answer shape of an askable and how raw answers decode.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How a question expects to be answered.
///
/// Unknown type names in configuration fall back to `SingleChoice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultiChoice,
    Number,
    Date,
    #[default]
    #[serde(other)]
    SingleChoice,
}

/// A decoded answer, as handed back to the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    /// One opaque token (single choice, date).
    Token(String),
    /// Ordered opaque tokens (multi choice), in submission order.
    Tokens(Vec<String>),
    /// A floating point number.
    Number(f64),
}

/// Errors raised while decoding a raw answer sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("Answer is empty")]
    EmptyAnswer,

    #[error("'{raw}' is not a number")]
    MalformedNumber { raw: String },
}

impl QuestionKind {
    /// Returns true for kinds answered by picking from `options`.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionKind::SingleChoice | QuestionKind::MultiChoice)
    }

    /// Decodes the raw wire answer (always a string sequence) into a typed value.
    ///
    /// Only the first element is used for every kind except `MultiChoice`.
    /// Dates are passed through as opaque tokens.
    pub fn decode(&self, raw: &[String]) -> Result<TypedValue, DecodeError> {
        if let QuestionKind::MultiChoice = self {
            return Ok(TypedValue::Tokens(raw.to_vec()));
        }

        let first = raw.first().ok_or(DecodeError::EmptyAnswer)?;
        match self {
            QuestionKind::Number => first
                .trim()
                .parse::<f64>()
                .map(TypedValue::Number)
                .map_err(|_| DecodeError::MalformedNumber { raw: first.clone() }),
            _ => Ok(TypedValue::Token(first.clone())),
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionKind::SingleChoice => "single_choice",
            QuestionKind::MultiChoice => "multi_choice",
            QuestionKind::Number => "number",
            QuestionKind::Date => "date",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Token(t) => write!(f, "{}", t),
            TypedValue::Tokens(ts) => write!(f, "[{}]", ts.join(", ")),
            TypedValue::Number(n) => write!(f, "{}", n),
        }
    }
}
