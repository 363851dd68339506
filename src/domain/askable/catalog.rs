//! AskableCatalog - the immutable set of askables loaded once per process.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use super::{AskableOption, AskableSpec, QuestionKind};
use crate::domain::foundation::{AskableId, ValidationError};

/// Errors that can occur while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Askables document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid askable '{id}': {source}")]
    InvalidAskable {
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// On-disk document shape: `{"askables": {"<id>": {...}}}`.
#[derive(Debug, Deserialize)]
struct AskablesDocument {
    askables: BTreeMap<String, AskableRecord>,
}

#[derive(Debug, Deserialize)]
struct AskableRecord {
    #[serde(default)]
    text: String,
    #[serde(rename = "type", default)]
    kind: QuestionKind,
    #[serde(default)]
    options: Vec<AskableOption>,
    #[serde(default)]
    default: Option<Value>,
}

/// Immutable askable lookup table.
#[derive(Debug, Clone, Default)]
pub struct AskableCatalog {
    specs: BTreeMap<AskableId, AskableSpec>,
}

impl AskableCatalog {
    /// Builds a catalog from already validated specs. Later duplicates win.
    pub fn from_specs(specs: impl IntoIterator<Item = AskableSpec>) -> Self {
        Self {
            specs: specs.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    /// Parses the JSON askables document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: AskablesDocument = serde_json::from_str(json)?;
        let mut specs = Vec::with_capacity(document.askables.len());
        for (raw_id, record) in document.askables {
            let invalid = |source| CatalogError::InvalidAskable {
                id: raw_id.clone(),
                source,
            };
            let id = AskableId::new(raw_id.clone()).map_err(invalid)?;
            let spec = AskableSpec::new(id, record.text, record.kind, record.options, record.default)
                .map_err(invalid)?;
            specs.push(spec);
        }
        Ok(Self::from_specs(specs))
    }

    pub fn get(&self, id: &AskableId) -> Option<&AskableSpec> {
        self.specs.get(id)
    }

    pub fn contains(&self, id: &AskableId) -> bool {
        self.specs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &AskableId> {
        self.specs.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "askables": {
            "skin_type": {
                "text": "What is your skin type?",
                "type": "single_choice",
                "options": [
                    {"id": "dry", "text": "Dry"},
                    {"id": "oily", "text": "Oily"}
                ]
            },
            "concerns": {
                "text": "Which concerns apply?",
                "type": "multi_choice",
                "options": [
                    {"id": "acne", "text": "Acne"},
                    {"id": "wrinkles", "text": "Wrinkles"}
                ]
            },
            "age": {"text": "How old are you?", "type": "number", "default": 30}
        }
    }"#;

    #[test]
    fn parses_document() {
        let catalog = AskableCatalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);

        let age = catalog.get(&AskableId::new("age").unwrap()).unwrap();
        assert_eq!(age.kind, QuestionKind::Number);
        assert_eq!(age.default, Some(serde_json::json!(30)));

        let skin = catalog.get(&AskableId::new("skin_type").unwrap()).unwrap();
        assert_eq!(skin.options.len(), 2);
        assert_eq!(skin.options[0].id, "dry");
    }

    #[test]
    fn missing_type_defaults_to_single_choice() {
        let json = r#"{"askables": {"sun": {"text": "Sun?", "options": [{"id": "yes", "text": "Yes"}]}}}"#;
        let catalog = AskableCatalog::from_json_str(json).unwrap();
        let spec = catalog.get(&AskableId::new("sun").unwrap()).unwrap();
        assert_eq!(spec.kind, QuestionKind::SingleChoice);
    }

    #[test]
    fn choice_without_options_is_rejected() {
        let json = r#"{"askables": {"sun": {"text": "Sun?", "type": "single_choice"}}}"#;
        let err = AskableCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAskable { ref id, .. } if id == "sun"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = AskableCatalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn lookup_of_missing_id_returns_none() {
        let catalog = AskableCatalog::from_json_str(SAMPLE).unwrap();
        assert!(!catalog.contains(&AskableId::new("budget").unwrap()));
    }
}
