//! Knowledge adapters - file loaders and the rule engine.

mod files;
mod rule_engine;

pub use files::{load_catalog, load_knowledge_base, LoadError};
pub use rule_engine::RuleEngine;
