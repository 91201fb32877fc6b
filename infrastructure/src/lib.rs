//! Infrastructure layer for agent-forum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openclaw;
pub mod supabase;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, StoreCredentials};
pub use logging::JsonlConversationLogger;
pub use openclaw::OpenClawRuntime;
pub use supabase::SupabaseForumStore;
