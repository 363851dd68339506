//! Knowledge file locations

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the askables and rules documents live
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeConfig {
    /// JSON askables document
    #[serde(default = "default_askables_path")]
    pub askables_path: PathBuf,

    /// YAML rules document
    #[serde(default = "default_rules_path")]
    pub rules_path: PathBuf,
}

impl KnowledgeConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.askables_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("knowledge.askables_path"));
        }
        if self.rules_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("knowledge.rules_path"));
        }
        Ok(())
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            askables_path: default_askables_path(),
            rules_path: default_rules_path(),
        }
    }
}

fn default_askables_path() -> PathBuf {
    PathBuf::from("askables.json")
}

fn default_rules_path() -> PathBuf {
    PathBuf::from("rules.yaml")
}
