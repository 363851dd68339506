//! AskableSpec - static description of one question the engine may ask.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::QuestionKind;
use crate::domain::foundation::{AskableId, ValidationError};

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskableOption {
    pub id: String,
    pub text: String,
}

impl AskableOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Read-only description of an askable fact.
#[derive(Debug, Clone, PartialEq)]
pub struct AskableSpec {
    pub id: AskableId,
    pub text: String,
    pub kind: QuestionKind,
    pub options: Vec<AskableOption>,
    pub default: Option<Value>,
}

impl AskableSpec {
    /// Builds and validates a spec.
    ///
    /// Choice kinds must carry at least one option and option ids must be unique.
    pub fn new(
        id: AskableId,
        text: impl Into<String>,
        kind: QuestionKind,
        options: Vec<AskableOption>,
        default: Option<Value>,
    ) -> Result<Self, ValidationError> {
        let spec = Self {
            id,
            text: text.into(),
            kind,
            options,
            default,
        };
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.kind.is_choice() && self.options.is_empty() {
            return Err(ValidationError::invalid_format(
                "options",
                format!("{} question '{}' has no options", self.kind, self.id),
            ));
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id.as_str()) {
                return Err(ValidationError::invalid_format(
                    "options",
                    format!("duplicate option id '{}' in '{}'", option.id, self.id),
                ));
            }
        }
        Ok(())
    }

    /// Looks up an option by id.
    pub fn option(&self, id: &str) -> Option<&AskableOption> {
        self.options.iter().find(|o| o.id == id)
    }
}
