//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod agent_runtime;
pub mod conversation_logger;
pub mod forum_store;
pub mod progress;
