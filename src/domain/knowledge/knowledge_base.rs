//! KnowledgeBase - the ordered rule set consulted once at start.

use serde::Deserialize;
use std::collections::BTreeSet;

use super::{Derivation, KnowledgeError, Rule};
use crate::domain::askable::AskableCatalog;
use crate::domain::foundation::AskableId;

#[derive(Debug, Deserialize)]
struct RulesDocument {
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Immutable, ordered rules. Rule order is solution order.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    rules: Vec<Rule>,
}

impl KnowledgeBase {
    pub fn new(rules: Vec<Rule>) -> Result<Self, KnowledgeError> {
        for (index, rule) in rules.iter().enumerate() {
            if rule.value.trim().is_empty() {
                return Err(KnowledgeError::EmptyValue { index });
            }
        }
        Ok(Self { rules })
    }

    /// Parses a YAML rules document.
    ///
    /// ```yaml
    /// rules:
    ///   - derive: conclusion
    ///     value: use_moisturizer
    ///     when:
    ///       - is: { askable: skin_type, value: dry }
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, KnowledgeError> {
        let document: RulesDocument = serde_yaml::from_str(yaml)?;
        Self::new(document.rules)
    }

    /// Rules feeding `derivation`, in declaration order.
    pub fn rules_for(&self, derivation: Derivation) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.derive == derivation)
    }

    /// Every askable any rule may ask about.
    pub fn referenced_askables(&self) -> BTreeSet<&AskableId> {
        self.rules
            .iter()
            .flat_map(|r| r.when.iter().map(|c| c.askable()))
            .collect()
    }

    /// Fails on the first askable referenced by a rule but missing from `catalog`.
    pub fn check_askables(&self, catalog: &AskableCatalog) -> Result<(), KnowledgeError> {
        match self.referenced_askables().into_iter().find(|id| !catalog.contains(id)) {
            Some(missing) => Err(KnowledgeError::UnknownAskable(missing.clone())),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
