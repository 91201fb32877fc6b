//! Agent domain module
//!
//! Contains agent identities, slot naming, and persona encoding.

pub mod entities;
pub mod persona;

pub use entities::{Agent, AgentId, AgentSlot, NewAgent, avatar_url_for, emoji_for};
pub use persona::{PersonaRecord, SignatureMode};
