//! Session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::BrokerConfig;

const MAX_REASKS_LIMIT: u32 = 10;

/// Question/answer protocol settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Text of the placeholder shown before the first question
    #[serde(default = "default_welcome_text")]
    pub welcome_text: String,

    /// Longest wait for one answer, in seconds. Unset waits indefinitely.
    pub answer_timeout_secs: Option<u64>,

    /// Re-asks allowed for an unusable answer before the run fails
    #[serde(default = "default_max_reasks")]
    pub max_reasks: u32,
}

impl SessionConfig {
    pub fn answer_timeout(&self) -> Option<Duration> {
        self.answer_timeout_secs.map(Duration::from_secs)
    }

    pub fn broker_config(&self) -> BrokerConfig {
        BrokerConfig {
            answer_timeout: self.answer_timeout(),
            max_reasks: self.max_reasks,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.welcome_text.trim().is_empty() {
            return Err(ValidationError::MissingRequired("session.welcome_text"));
        }
        if self.answer_timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_reasks > MAX_REASKS_LIMIT {
            return Err(ValidationError::TooManyReasks);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            welcome_text: default_welcome_text(),
            answer_timeout_secs: None,
            max_reasks: default_max_reasks(),
        }
    }
}

fn default_welcome_text() -> String {
    "Welcome to your Personalized Skincare Assistant. Press [Enter] to begin the consultation.".to_string()
}

fn default_max_reasks() -> u32 {
    2
}
