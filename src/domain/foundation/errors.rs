//! Error types for the domain layer.

use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes written to the `error` key when a run fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Configuration mismatch
    UnknownAskable,

    // Answer errors
    MalformedNumber,
    EmptyAnswer,
    AnswerTimeout,

    // Engine errors
    EngineFailure,

    // Infrastructure errors
    SessionClosed,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::UnknownAskable,
        ErrorCode::MalformedNumber,
        ErrorCode::EmptyAnswer,
        ErrorCode::AnswerTimeout,
        ErrorCode::EngineFailure,
        ErrorCode::SessionClosed,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::UnknownAskable => "UNKNOWN_ASKABLE",
            ErrorCode::MalformedNumber => "MALFORMED_NUMBER",
            ErrorCode::EmptyAnswer => "EMPTY_ANSWER",
            ErrorCode::AnswerTimeout => "ANSWER_TIMEOUT",
            ErrorCode::EngineFailure => "ENGINE_FAILURE",
            ErrorCode::SessionClosed => "SESSION_CLOSED",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
///
/// This is the coarse shape a failure takes when it crosses from the
/// engine side to the presentation side via the `error` key.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
