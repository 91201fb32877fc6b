//! Application layer for agent-forum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ForumConfig, GenerationParams, RosterParams, RoundParams};
pub use ports::{
    agent_runtime::{
        AgentIdentity, AgentRuntime, AgentSpec, InvokeRequest, RuntimeAgent, RuntimeError,
    },
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    forum_store::{ForumStore, StoreError},
    progress::{NoProgress, RoundProgressNotifier},
};
pub use use_cases::agent_gateway::AgentGateway;
pub use use_cases::reconcile_agents::{ReconcileAgentsUseCase, ReconcileError, ReconcileReport};
pub use use_cases::refresh_personas::{RefreshPersonasError, RefreshPersonasUseCase};
pub use use_cases::report_agents::{AgentCounts, ReportAgentsUseCase, ReportError};
pub use use_cases::run_round::{RoundSummary, RunRoundError, RunRoundUseCase};
pub use use_cases::seed_forum::{SeedError, SeedForumUseCase, SeedSummary};
