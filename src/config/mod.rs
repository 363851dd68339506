//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `EXPERT_ADVISOR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use expert_advisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Rules from {}", config.knowledge.rules_path.display());
//! ```

mod error;
mod knowledge;
mod logging;
mod session;

pub use error::{ConfigError, ValidationError};
pub use knowledge::KnowledgeConfig;
pub use logging::LoggingConfig;
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable config.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Askables and rules file locations
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Question/answer protocol settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `EXPERT_ADVISOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `EXPERT_ADVISOR__KNOWLEDGE__RULES_PATH=kb/rules.yaml` -> `knowledge.rules_path`
    /// - `EXPERT_ADVISOR__SESSION__ANSWER_TIMEOUT_SECS=300` -> `session.answer_timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EXPERT_ADVISOR")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.knowledge.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "EXPERT_ADVISOR__KNOWLEDGE__RULES_PATH",
        "EXPERT_ADVISOR__SESSION__ANSWER_TIMEOUT_SECS",
        "EXPERT_ADVISOR__SESSION__MAX_REASKS",
        "EXPERT_ADVISOR__LOGGING__JSON",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.knowledge.askables_path, PathBuf::from("askables.json"));
        assert_eq!(config.session.answer_timeout_secs, None);
        assert_eq!(config.session.max_reasks, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("EXPERT_ADVISOR__KNOWLEDGE__RULES_PATH", "kb/rules.yaml");
        env::set_var("EXPERT_ADVISOR__SESSION__ANSWER_TIMEOUT_SECS", "120");
        env::set_var("EXPERT_ADVISOR__SESSION__MAX_REASKS", "0");
        env::set_var("EXPERT_ADVISOR__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.knowledge.rules_path, PathBuf::from("kb/rules.yaml"));
        assert_eq!(config.session.answer_timeout_secs, Some(120));
        assert_eq!(config.session.max_reasks, 0);
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("EXPERT_ADVISOR__SESSION__ANSWER_TIMEOUT_SECS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
