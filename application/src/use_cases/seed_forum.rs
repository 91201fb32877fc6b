//! Seed Forum use case
//!
//! Fills an empty board with canned threads and replies so a first round has
//! something to react to. Nothing here calls the agent runtime.

use crate::ports::forum_store::{ForumStore, StoreError};
use chrono::Utc;
use forum_domain::payload::canned;
use forum_domain::{NewPost, Post, RoundId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const SEED_THREADS: usize = 10;
pub const SEED_REPLIES: usize = 30;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("No agents in the directory. Run bootstrap first.")]
    NoAgents,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub round_id: RoundId,
    pub threads: usize,
    pub replies: usize,
}

pub struct SeedForumUseCase<S: ForumStore + 'static> {
    store: Arc<S>,
    threads: usize,
    replies: usize,
    seed: Option<u64>,
}

impl<S: ForumStore + 'static> SeedForumUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            threads: SEED_THREADS,
            replies: SEED_REPLIES,
            seed: None,
        }
    }

    pub fn with_counts(mut self, threads: usize, replies: usize) -> Self {
        self.threads = threads;
        self.replies = replies;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Insert the canned threads, then replies to random ones among them.
    pub async fn execute(&self) -> Result<SeedSummary, SeedError> {
        let agents = self.store.list_agents().await?;
        if agents.is_empty() {
            return Err(SeedError::NoAgents);
        }

        let round_id = RoundId::seed(Utc::now().timestamp_millis());
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!("Seeding round {} with {} threads", round_id, self.threads);

        let mut threads: Vec<Post> = Vec::with_capacity(self.threads);
        for _ in 0..self.threads {
            let Some(agent) = agents.choose(&mut rng) else {
                break;
            };
            let draft = canned::thread_draft(&agent.display_name, &mut rng);
            let row = NewPost::thread(agent.id.clone(), draft.title, draft.body, round_id.clone());
            let post = self.store.insert_post(&row).await?;
            debug!("Seeded thread {} by {}", post.id, agent.slug);
            threads.push(post);
        }

        let mut replies = 0;
        for _ in 0..self.replies {
            let (Some(agent), Some(parent)) = (agents.choose(&mut rng), threads.choose(&mut rng)) else {
                break;
            };
            let draft = canned::reply_draft(&mut rng);
            let row = NewPost::reply(agent.id.clone(), parent, draft.body, round_id.clone());
            self.store.insert_post(&row).await?;
            replies += 1;
        }

        info!("Seed complete: {} threads, {} replies", threads.len(), replies);
        Ok(SeedSummary {
            round_id,
            threads: threads.len(),
            replies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::FakeStore;

    #[tokio::test]
    async fn test_seed_inserts_threads_then_replies() {
        let store = Arc::new(FakeStore::with_agents(4));
        let summary = SeedForumUseCase::new(Arc::clone(&store))
            .with_seed(Some(7))
            .execute()
            .await
            .unwrap();

        assert_eq!(summary.threads, SEED_THREADS);
        assert_eq!(summary.replies, SEED_REPLIES);
        assert!(summary.round_id.as_str().starts_with("seed-"));

        let posts = store.posts();
        assert_eq!(posts.len(), SEED_THREADS + SEED_REPLIES);
        for post in posts.iter().filter(|p| p.depth == 1) {
            let parent_id = post.parent_id.as_ref().unwrap();
            let parent = posts.iter().find(|p| &p.id == parent_id).unwrap();
            assert!(parent.is_thread());
        }
        assert!(posts
            .iter()
            .all(|p| p.round_id.as_ref() == Some(&summary.round_id)));
    }

    #[tokio::test]
    async fn test_seed_without_agents() {
        let store = Arc::new(FakeStore::default());
        let result = SeedForumUseCase::new(store).execute().await;
        assert!(matches!(result, Err(SeedError::NoAgents)));
    }

    #[tokio::test]
    async fn test_no_replies_without_threads() {
        let store = Arc::new(FakeStore::with_agents(2));
        let summary = SeedForumUseCase::new(Arc::clone(&store))
            .with_counts(0, 5)
            .execute()
            .await
            .unwrap();
        assert_eq!(summary.replies, 0);
        assert!(store.posts().is_empty());
    }
}
