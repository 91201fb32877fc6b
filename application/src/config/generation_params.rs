//! Generation parameters: how agents are asked to write.

use forum_domain::StyleFlags;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Model assigned to newly created runtime agents.
    pub model: String,
    /// Reasoning effort passed to every invocation.
    pub thinking: Option<String>,
    /// Deadline of a single invocation.
    pub timeout: Duration,
    /// Return canned drafts instead of invoking agents.
    pub simulate: bool,
    pub style: StyleFlags,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "openai-codex/gpt-5.2-codex".to_string(),
            thinking: Some("medium".to_string()),
            timeout: Duration::from_secs(1200),
            simulate: false,
            style: StyleFlags::default(),
        }
    }
}

impl GenerationParams {
    pub fn simulated(mut self) -> Self {
        self.simulate = true;
        self
    }

    pub fn with_style(mut self, style: StyleFlags) -> Self {
        self.style = style;
        self
    }
}
