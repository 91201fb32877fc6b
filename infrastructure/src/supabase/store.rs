//! [`ForumStore`] adapter over Supabase PostgREST.
//!
//! Tables: `agents` (unique `slug`), `posts`, `post_votes`
//! (unique `(post_id, agent_id)`).

use super::client::{SupabaseClient, decode, prefer};
use async_trait::async_trait;
use forum_application::ports::forum_store::{ForumStore, StoreError};
use forum_domain::{Agent, NewAgent, NewPost, NewVote, PersonaRecord, Post};
use serde_json::{Value, json};
use tracing::debug;

const AGENT_COLUMNS: &str = "id,slug,display_name,anon_index,persona,avatar_url";
const POST_COLUMNS: &str = "id,agent_id,parent_id,title,body,round_id,depth,created_at,upvotes,downvotes";

pub struct SupabaseForumStore {
    client: SupabaseClient,
}

impl SupabaseForumStore {
    pub fn new(url: &str, service_role_key: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: SupabaseClient::new(url, service_role_key)?,
        })
    }

    async fn recent(
        &self,
        operation: &str,
        parent_filter: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Post>, StoreError> {
        let mut query = vec![
            ("select", POST_COLUMNS.to_string()),
            ("order", "created_at.desc".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(filter) = parent_filter {
            query.push(("parent_id", filter.to_string()));
        }
        self.client.select(operation, "posts", &query).await
    }
}

#[async_trait]
impl ForumStore for SupabaseForumStore {
    async fn list_agents(&self) -> Result<Vec<Agent>, StoreError> {
        let query = [
            ("select", AGENT_COLUMNS.to_string()),
            ("order", "slug.asc".to_string()),
        ];
        self.client.select("list agents", "agents", &query).await
    }

    async fn upsert_agents(&self, agents: &[NewAgent]) -> Result<(), StoreError> {
        if agents.is_empty() {
            return Ok(());
        }
        debug!("Upserting {} agents", agents.len());
        self.client
            .insert(
                "upsert agents",
                "agents",
                &[("on_conflict", "slug".to_string())],
                agents,
                prefer::MERGE_DUPLICATES,
            )
            .await?;
        Ok(())
    }

    async fn update_persona(&self, slug: &str, persona: &PersonaRecord) -> Result<(), StoreError> {
        let rows: Vec<Value> = self
            .client
            .update(
                "update persona",
                "agents",
                &[
                    ("slug", format!("eq.{}", slug)),
                    ("select", "slug".to_string()),
                ],
                &json!({ "persona": persona.to_json() }),
            )
            .await?;
        // PATCH matching no row still succeeds at the HTTP level
        if rows.is_empty() {
            return Err(StoreError::Rejected {
                operation: "update persona".to_string(),
                status: 404,
                message: format!("no agent with slug {}", slug),
            });
        }
        Ok(())
    }

    async fn recent_threads(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        self.recent("recent threads", Some("is.null"), limit).await
    }

    async fn recent_replies(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        self.recent("recent replies", Some("not.is.null"), limit).await
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        self.recent("recent posts", None, limit).await
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, StoreError> {
        let response = self
            .client
            .insert(
                "insert post",
                "posts",
                &[("select", POST_COLUMNS.to_string())],
                post,
                prefer::REPRESENTATION,
            )
            .await?;
        let rows: Vec<Post> = decode("insert post", response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert post: no row returned".to_string()))
    }

    async fn insert_votes(&self, votes: &[NewVote]) -> Result<(), StoreError> {
        if votes.is_empty() {
            return Ok(());
        }
        self.client
            .insert(
                "insert votes",
                "post_votes",
                &[("on_conflict", "post_id,agent_id".to_string())],
                votes,
                prefer::IGNORE_DUPLICATES,
            )
            .await?;
        Ok(())
    }
}
