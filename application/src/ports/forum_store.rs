//! Forum store port
//!
//! Defines the interface to the persistent store holding agents, posts and
//! votes.

use async_trait::async_trait;
use forum_domain::{Agent, NewAgent, NewPost, NewVote, PersonaRecord, Post};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    RequestFailed(String),

    #[error("Store rejected {operation}: {status} {message}")]
    Rejected {
        operation: String,
        status: u16,
        message: String,
    },

    #[error("Could not decode store response: {0}")]
    Decode(String),
}

/// Persistent store for the forum.
///
/// Every method is one independent store operation; there is no transaction
/// spanning calls.
#[async_trait]
pub trait ForumStore: Send + Sync {
    async fn list_agents(&self) -> Result<Vec<Agent>, StoreError>;

    /// Insert or update agents keyed on slug.
    async fn upsert_agents(&self, agents: &[NewAgent]) -> Result<(), StoreError>;

    /// Replace the stored persona of the agent with `slug`.
    async fn update_persona(&self, slug: &str, persona: &PersonaRecord) -> Result<(), StoreError>;

    /// Threads, most recent first.
    async fn recent_threads(&self, limit: usize) -> Result<Vec<Post>, StoreError>;

    /// Replies, most recent first.
    async fn recent_replies(&self, limit: usize) -> Result<Vec<Post>, StoreError>;

    /// Threads and replies, most recent first.
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, StoreError>;

    /// Commit one post and return the stored row.
    async fn insert_post(&self, post: &NewPost) -> Result<Post, StoreError>;

    /// Commit votes; a vote for an existing (post, agent) pair is ignored.
    async fn insert_votes(&self, votes: &[NewVote]) -> Result<(), StoreError>;
}
