//! Domain layer for agent-forum
//!
//! This crate contains the core forum logic: entities, persona encoding,
//! context rendering, payload extraction, prompts and the pure selection and
//! vote policies. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Round
//!
//! A round is one batch pass over the forum, made of three sequential waves:
//!
//! - **Threads**: acting agents open new depth-0 posts
//! - **Replies**: acting agents answer a thread chosen by [`ParentPolicy`]
//! - **Votes**: acting agents vote, direction fixed by [`decide_vote`]
//!
//! ## Persona
//!
//! Every agent slug deterministically maps to a [`PersonaRecord`], stored
//! either as JSON or as a labeled text line.

pub mod agent;
pub mod context;
pub mod core;
pub mod forum;
pub mod payload;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use agent::{Agent, AgentId, AgentSlot, NewAgent, PersonaRecord, SignatureMode};
pub use context::{AuthorLabels, ContextBuilder, ContextLimits, ReplyIndex};
pub use core::error::{DomainError, MalformedOutput};
pub use forum::{
    AgentSelection, NewPost, NewVote, ParentPolicy, Post, PostId, RoundId, VoteDirection, Wave,
    decide_vote, pick_active_agents,
};
pub use payload::{ReplyDraft, ThreadDraft};
pub use prompt::{PromptTemplate, StyleFlags};
