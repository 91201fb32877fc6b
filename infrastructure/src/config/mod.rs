//! Configuration file loading for agent-forum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment (`FORUM_` prefix, `__` nesting; Supabase variables)
//! 2. `--config <path>` specified file
//! 3. Project root: `./forum.toml` or `./.forum.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/agent-forum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileContextConfig, FileGenerationConfig,
    FileLoggingConfig, FileRosterConfig, FileRoundConfig, FileRuntimeConfig, FileStoreConfig,
    StoreCredentials,
};
pub use loader::ConfigLoader;
