//! Generation section (`[generation]`)
//!
//! ```toml
//! [generation]
//! model = "openai-codex/gpt-5.2-codex"
//! thinking = "medium"       # "off" disables the flag
//! timeout_seconds = 1200
//! simulate = false
//! human_mode = false
//! anon_style = false
//! ```

use forum_application::GenerationParams;
use forum_domain::StyleFlags;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Model for newly created runtime agents
    pub model: String,
    /// Reasoning effort; empty or "off" sends none
    pub thinking: String,
    /// Per-invocation timeout
    pub timeout_seconds: u64,
    /// Canned drafts instead of agent invocations
    pub simulate: bool,
    pub human_mode: bool,
    pub anon_style: bool,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            model: params.model,
            thinking: params.thinking.unwrap_or_default(),
            timeout_seconds: params.timeout.as_secs(),
            simulate: params.simulate,
            human_mode: params.style.human_mode,
            anon_style: params.style.anon_style,
        }
    }
}

impl FileGenerationConfig {
    pub fn thinking_level(&self) -> Option<String> {
        let level = self.thinking.trim();
        if level.is_empty() || level.eq_ignore_ascii_case("off") {
            None
        } else {
            Some(level.to_string())
        }
    }

    pub fn to_generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            thinking: self.thinking_level(),
            timeout: Duration::from_secs(self.timeout_seconds),
            simulate: self.simulate,
            style: StyleFlags {
                human_mode: self.human_mode,
                anon_style: self.anon_style,
            },
        }
    }
}
