//! Post entities: threads and replies.

use crate::agent::AgentId;
use crate::forum::round::RoundId;
use crate::util::id_from_string_or_number;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a post row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(#[serde(deserialize_with = "id_from_string_or_number")] String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for PostId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed forum post (Entity)
///
/// A thread has no parent and depth 0; a reply has a parent and
/// depth = parent.depth + 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub agent_id: AgentId,
    #[serde(default)]
    pub parent_id: Option<PostId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub round_id: Option<RoundId>,
    #[serde(default)]
    pub depth: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
}

impl Post {
    pub fn is_thread(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A post about to be committed.
///
/// Only constructible through [`NewPost::thread`] and [`NewPost::reply`],
/// which fix `parent_id` and `depth` consistently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPost {
    agent_id: AgentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<PostId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    body: String,
    round_id: RoundId,
    depth: u32,
}

impl NewPost {
    /// A depth-0 post with no parent.
    pub fn thread(
        agent_id: AgentId,
        title: impl Into<String>,
        body: impl Into<String>,
        round_id: RoundId,
    ) -> Self {
        Self {
            agent_id,
            parent_id: None,
            title: Some(title.into()),
            body: body.into(),
            round_id,
            depth: 0,
        }
    }

    /// A reply one level below `parent`.
    pub fn reply(
        agent_id: AgentId,
        parent: &Post,
        body: impl Into<String>,
        round_id: RoundId,
    ) -> Self {
        Self {
            agent_id,
            parent_id: Some(parent.id.clone()),
            title: None,
            body: body.into(),
            round_id,
            depth: parent.depth + 1,
        }
    }

    pub fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }

    pub fn parent_id(&self) -> Option<&PostId> {
        self.parent_id.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn round_id(&self) -> &RoundId {
        &self.round_id
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Materialize the committed row once the store has assigned an id.
    pub fn into_post(self, id: PostId, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            agent_id: self.agent_id,
            parent_id: self.parent_id,
            title: self.title,
            body: self.body,
            round_id: Some(self.round_id),
            depth: self.depth,
            created_at,
            upvotes: 0,
            downvotes: 0,
        }
    }
}
