//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application's
//! [`ForumConfig`] once validated.

mod generation;
mod round;
mod services;

pub use generation::FileGenerationConfig;
pub use round::{FileContextConfig, FileRosterConfig, FileRoundConfig};
pub use services::{FileLoggingConfig, FileRuntimeConfig, FileStoreConfig};

use forum_application::{ForumConfig, RosterParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("generation.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("round.max_concurrency cannot be 0")]
    InvalidConcurrency,

    #[error("round.vote_up_probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("roster.agent_count cannot be 0")]
    InvalidAgentCount,

    #[error("generation.model cannot be empty")]
    EmptyModelName,

    #[error("missing {0} (set it in [store] or via the environment)")]
    MissingStoreSetting(&'static str),
}

/// Connection settings of the forum store, validated.
#[derive(Clone)]
pub struct StoreCredentials {
    pub url: String,
    pub service_role_key: String,
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub roster: FileRosterConfig,
    pub round: FileRoundConfig,
    pub context: FileContextConfig,
    pub generation: FileGenerationConfig,
    /// Agent runtime CLI settings
    pub runtime: FileRuntimeConfig,
    /// Forum store connection
    pub store: FileStoreConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the behaviour settings. Store credentials are checked
    /// separately by [`FileConfig::store_credentials`].
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.generation.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.generation.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.round.max_concurrency == 0 {
            return Err(ConfigValidationError::InvalidConcurrency);
        }
        let p = self.round.vote_up_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigValidationError::InvalidProbability(p));
        }
        if self.roster.agent_count == 0 {
            return Err(ConfigValidationError::InvalidAgentCount);
        }
        Ok(())
    }

    /// Validate and convert into the immutable application configuration.
    pub fn to_forum_config(&self) -> Result<ForumConfig, ConfigValidationError> {
        self.validate()?;
        Ok(ForumConfig::new(
            RosterParams {
                agent_count: self.roster.agent_count,
                active_agents: self.roster.active_agents,
                agents_dir: self.runtime.agents_dir.clone(),
            },
            self.round.to_round_params(),
            self.context.to_context_limits(),
            self.generation.to_generation_params(),
        ))
    }

    pub fn store_credentials(&self) -> Result<StoreCredentials, ConfigValidationError> {
        let url = non_empty(&self.store.url).ok_or(ConfigValidationError::MissingStoreSetting("store.url"))?;
        let service_role_key = non_empty(&self.store.service_role_key)
            .ok_or(ConfigValidationError::MissingStoreSetting("store.service_role_key"))?;
        Ok(StoreCredentials {
            url: url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[roster]
agent_count = 12
active_agents = 4

[round]
new_threads = 2
new_replies = 5
vote_up_probability = 0.5
max_concurrency = 3

[context]
threads = 3

[generation]
thinking = "high"
timeout_seconds = 90
anon_style = true

[runtime]
agents_dir = "/srv/agents"

[store]
url = "https://forum.example.co/"
service_role_key = "secret"

[logging]
transcript = "round.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let forum = config.to_forum_config().unwrap();
        assert_eq!(forum.roster().agent_count, 12);
        assert_eq!(forum.roster().active_agents, 4);
        assert_eq!(forum.roster().agents_dir, PathBuf::from("/srv/agents"));
        assert_eq!(forum.round().new_threads, 2);
        assert_eq!(forum.round().new_replies, 5);
        assert_eq!(forum.round().max_concurrency, 3);
        assert_eq!(forum.context().threads, 3);
        assert_eq!(forum.context().replies, 6);
        assert_eq!(forum.generation().thinking.as_deref(), Some("high"));
        assert_eq!(forum.generation().timeout, Duration::from_secs(90));
        assert!(forum.generation().style.anon_style);

        let credentials = config.store_credentials().unwrap();
        assert_eq!(credentials.url, "https://forum.example.co");
        assert_eq!(credentials.service_role_key, "secret");
        assert_eq!(config.logging.transcript, Some(PathBuf::from("round.jsonl")));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.runtime.command, "openclaw");
        assert!(config.logging.transcript.is_none());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = FileConfig::default();
        config.generation.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.round.max_concurrency = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidConcurrency));

        let mut config = FileConfig::default();
        config.round.vote_up_probability = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidProbability(1.5))
        );

        let mut config = FileConfig::default();
        config.roster.agent_count = 0;
        assert!(config.to_forum_config().is_err());
    }

    #[test]
    fn test_missing_store_credentials() {
        let mut config = FileConfig::default();
        assert_eq!(
            config.store_credentials().unwrap_err(),
            ConfigValidationError::MissingStoreSetting("store.url")
        );

        config.store.url = Some("https://forum.example.co".to_string());
        config.store.service_role_key = Some("   ".to_string());
        assert_eq!(
            config.store_credentials().unwrap_err(),
            ConfigValidationError::MissingStoreSetting("store.service_role_key")
        );
    }
}
