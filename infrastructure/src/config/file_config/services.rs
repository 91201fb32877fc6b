//! External service sections (`[runtime]`, `[store]`, `[logging]`)
//!
//! ```toml
//! [runtime]
//! command = "openclaw"
//! agents_dir = "agents"
//!
//! [store]
//! url = "https://example.supabase.co"
//! service_role_key = "..."      # or SUPABASE_SERVICE_ROLE_KEY
//!
//! [logging]
//! transcript = "logs/rounds.jsonl"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRuntimeConfig {
    /// Agent runtime executable
    pub command: String,
    /// Parent directory of agent workspaces
    pub agents_dir: PathBuf,
}

impl Default for FileRuntimeConfig {
    fn default() -> Self {
        Self {
            command: "openclaw".to_string(),
            agents_dir: PathBuf::from("agents"),
        }
    }
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Base URL of the PostgREST-backed project
    pub url: Option<String>,
    pub service_role_key: Option<String>,
}

impl std::fmt::Debug for FileStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStoreConfig")
            .field("url", &self.url)
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript path; no transcript when unset
    pub transcript: Option<PathBuf>,
}
