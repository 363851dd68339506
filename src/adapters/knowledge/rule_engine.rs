//! Rule engine adapter - evaluates a `KnowledgeBase` against facts that
//! are obtained on demand.
//!
//! Conditions are tested left to right and evaluation of a rule stops at the
//! first condition that fails, so an askable is only asked for when every
//! earlier condition of the rule holds. Answers are memoized for the rest of
//! the run; `reset_known_facts` forgets them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::askable::TypedValue;
use crate::domain::foundation::AskableId;
use crate::domain::knowledge::{Derivation, KnowledgeBase, Rule};
use crate::ports::{EngineError, FactProvider, InferenceEngine};

/// Inference engine over an ordered rule set with a per-run fact memo.
pub struct RuleEngine {
    knowledge: KnowledgeBase,
    known: Mutex<HashMap<AskableId, TypedValue>>,
}

impl RuleEngine {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self {
            knowledge,
            known: Mutex::new(HashMap::new()),
        }
    }

    /// Facts learned so far in the current run.
    pub fn known_facts(&self) -> HashMap<AskableId, TypedValue> {
        self.known.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    async fn fact(&self, askable: &AskableId, facts: &dyn FactProvider) -> Result<TypedValue, EngineError> {
        let cached = self
            .known
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(askable)
            .cloned();
        if let Some(value) = cached {
            return Ok(value);
        }

        let value = facts.resolve(askable).await?;
        tracing::debug!(askable = %askable, value = %value, "Fact learned");
        self.known
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(askable.clone(), value.clone());
        Ok(value)
    }

    async fn rule_holds(&self, rule: &Rule, facts: &dyn FactProvider) -> Result<bool, EngineError> {
        for condition in &rule.when {
            let value = self.fact(condition.askable(), facts).await?;
            if !condition.holds(&value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl InferenceEngine for RuleEngine {
    async fn reset_known_facts(&self) -> Result<(), EngineError> {
        self.known.lock().unwrap_or_else(PoisonError::into_inner).clear();
        Ok(())
    }

    async fn solve(
        &self,
        derivation: Derivation,
        facts: &dyn FactProvider,
    ) -> Result<Vec<String>, EngineError> {
        let mut solutions = Vec::new();
        for rule in self.knowledge.rules_for(derivation) {
            if self.rule_holds(rule, facts).await? {
                solutions.push(rule.value.clone());
            }
        }
        tracing::debug!(%derivation, count = solutions.len(), "Derivation solved");
        Ok(solutions)
    }
}
