//! Agent runtime port
//!
//! Defines the interface to the external environment that hosts the agents:
//! it lists and creates agent identities and runs one prompt through an
//! agent. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the agent runtime.
///
/// Every variant is a hard failure: the caller aborts its work and nothing
/// is retried.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Agent runtime unavailable: {0}")]
    Unavailable(String),

    #[error("Agent {agent} failed: {message}")]
    InvocationFailed { agent: String, message: String },

    #[error("Agent {agent} timed out after {seconds}s")]
    Timeout { agent: String, seconds: u64 },

    #[error("Unexpected runtime output: {0}")]
    UnexpectedOutput(String),
}

/// One prompt sent to one agent.
#[derive(Debug, Clone)]
pub struct InvokeRequest {
    /// Agent slug in the runtime
    pub agent: String,
    /// Conversation session to continue
    pub session_id: String,
    pub message: String,
    pub timeout: Duration,
    /// Reasoning effort hint, passed through when set
    pub thinking: Option<String>,
}

/// An agent to be created in the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSpec {
    pub slug: String,
    pub workspace: PathBuf,
    pub model: String,
}

/// Display attributes of a runtime agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdentity {
    pub slug: String,
    pub name: String,
    pub theme: String,
    pub emoji: String,
}

/// An agent as listed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeAgent {
    pub id: String,
    pub name: Option<String>,
}

/// Gateway to the agent-hosting runtime
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Run one prompt and return the agent's concatenated text output.
    async fn invoke(&self, request: InvokeRequest) -> Result<String, RuntimeError>;

    /// Agents currently known to the runtime.
    async fn list_agents(&self) -> Result<Vec<RuntimeAgent>, RuntimeError>;

    async fn create_agent(&self, spec: &AgentSpec) -> Result<(), RuntimeError>;

    async fn set_identity(&self, identity: &AgentIdentity) -> Result<(), RuntimeError>;
}
