//! Bounded textual digests of recent forum activity.
//!
//! No summarization happens here: posts are cut by recency and excerpts are
//! cut by length, nothing else.

use crate::agent::{Agent, AgentId};
use crate::core::string::{single_line, take_chars};
use crate::forum::post::{Post, PostId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum characters of a title or body quoted in a context line.
pub const EXCERPT_CHARS: usize = 160;

const UNKNOWN_AUTHOR: &str = "anon";

/// How many posts each context block may quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextLimits {
    /// Most recent threads in the global block
    pub threads: usize,
    /// Most recent replies in the global block
    pub replies: usize,
    /// Most recent replies quoted from the thread being answered
    pub thread_replies: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            threads: 6,
            replies: 6,
            thread_replies: 4,
        }
    }
}

/// Anonymized author label per agent id.
#[derive(Debug, Clone, Default)]
pub struct AuthorLabels {
    labels: HashMap<AgentId, String>,
}

impl AuthorLabels {
    pub fn from_agents(agents: &[Agent]) -> Self {
        Self {
            labels: agents
                .iter()
                .map(|agent| (agent.id.clone(), agent.author_label()))
                .collect(),
        }
    }

    pub fn label(&self, agent_id: &AgentId) -> &str {
        self.labels
            .get(agent_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// Replies grouped by parent post, each group most recent first.
#[derive(Debug, Clone, Default)]
pub struct ReplyIndex {
    by_parent: HashMap<PostId, Vec<Post>>,
}

impl ReplyIndex {
    pub fn from_replies<'a>(replies: impl IntoIterator<Item = &'a Post>) -> Self {
        let mut by_parent: HashMap<PostId, Vec<Post>> = HashMap::new();
        for reply in replies {
            if let Some(parent_id) = &reply.parent_id {
                by_parent
                    .entry(parent_id.clone())
                    .or_default()
                    .push(reply.clone());
            }
        }
        for group in by_parent.values_mut() {
            group.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        Self { by_parent }
    }

    pub fn replies_to(&self, parent_id: &PostId) -> &[Post] {
        self.by_parent
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_parent.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_parent.is_empty()
    }
}

/// Renders context blocks under fixed [`ContextLimits`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextBuilder {
    limits: ContextLimits,
}

impl ContextBuilder {
    pub fn new(limits: ContextLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ContextLimits {
        &self.limits
    }

    /// Digest of the forum as a whole.
    ///
    /// ```text
    /// Recent threads:
    /// 1) [anon-003] Title: Alert fatigue / Body: We paged 40 times last night...
    ///
    /// Recent replies:
    /// 1) [anon-011] Same here, we cut it down by grouping alerts.
    /// ```
    ///
    /// Returns an empty string when there is nothing to quote.
    pub fn global_context(&self, threads: &[Post], replies: &[Post], authors: &AuthorLabels) -> String {
        let mut blocks = Vec::new();

        let threads = most_recent(threads, self.limits.threads);
        if !threads.is_empty() {
            let lines: Vec<String> = threads
                .iter()
                .enumerate()
                .map(|(i, post)| {
                    format!(
                        "{}) [{}] Title: {} / Body: {}",
                        i + 1,
                        authors.label(&post.agent_id),
                        post.title
                            .as_deref()
                            .map(excerpt)
                            .unwrap_or_else(|| "(untitled)".to_string()),
                        excerpt(&post.body)
                    )
                })
                .collect();
            blocks.push(format!("Recent threads:\n{}", lines.join("\n")));
        }

        let replies = most_recent(replies, self.limits.replies);
        if !replies.is_empty() {
            blocks.push(format!(
                "Recent replies:\n{}",
                reply_lines(&replies, authors).join("\n")
            ));
        }

        blocks.join("\n\n")
    }

    /// Digest of one thread's own replies, or an empty string when it has
    /// none.
    pub fn thread_context(&self, parent: &Post, index: &ReplyIndex, authors: &AuthorLabels) -> String {
        let replies = most_recent(index.replies_to(&parent.id), self.limits.thread_replies);
        if replies.is_empty() {
            return String::new();
        }
        format!(
            "Replies in this thread:\n{}",
            reply_lines(&replies, authors).join("\n")
        )
    }

    /// Join non-empty context blocks.
    pub fn combine(blocks: &[&str]) -> String {
        blocks
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn most_recent(posts: &[Post], limit: usize) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

fn reply_lines(replies: &[&Post], authors: &AuthorLabels) -> Vec<String> {
    replies
        .iter()
        .enumerate()
        .map(|(i, post)| {
            format!(
                "{}) [{}] {}",
                i + 1,
                authors.label(&post.agent_id),
                excerpt(&post.body)
            )
        })
        .collect()
}

fn excerpt(text: &str) -> String {
    let flat = single_line(text);
    if flat.is_empty() {
        return "(empty)".to_string();
    }
    let cut = take_chars(&flat, EXCERPT_CHARS);
    if cut.len() < flat.len() {
        format!("{}...", cut)
    } else {
        flat
    }
}
