//! Run Round use case
//!
//! Orchestrates one round: a thread wave, a reply wave and a vote wave, in
//! that order. Each wave fans out under one shared concurrency limiter and
//! finishes completely before the next wave reads the store again.

use crate::config::{ForumConfig, RosterParams, RoundParams};
use crate::ports::agent_runtime::{AgentRuntime, RuntimeError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::forum_store::{ForumStore, StoreError};
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use crate::use_cases::agent_gateway::AgentGateway;
use crate::use_cases::shared::run_bounded;
use forum_domain::{
    Agent, AuthorLabels, ContextBuilder, NewPost, NewVote, ParentPolicy, Post, ReplyIndex,
    RoundId, Wave, decide_vote, pick_active_agents,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

/// Errors that abort a round
#[derive(Error, Debug)]
pub enum RunRoundError {
    #[error("No agents in the directory. Run bootstrap first.")]
    NoAgents,

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Task join error: {0}")]
    Join(#[from] JoinError),
}

/// What one round committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round_id: RoundId,
    /// The board had no threads when the round started.
    pub cold_start: bool,
    pub threads: usize,
    pub replies: usize,
    /// Votes submitted; the store drops duplicates of earlier votes.
    pub votes: usize,
}

/// Use case for running one round
pub struct RunRoundUseCase<R: AgentRuntime + 'static, S: ForumStore + 'static> {
    gateway: Arc<AgentGateway<R>>,
    store: Arc<S>,
    roster: RosterParams,
    round: RoundParams,
    context: ContextBuilder,
    parent_policy: ParentPolicy,
    logger: Arc<dyn ConversationLogger>,
}

impl<R: AgentRuntime + 'static, S: ForumStore + 'static> RunRoundUseCase<R, S> {
    pub fn new(gateway: Arc<AgentGateway<R>>, store: Arc<S>, config: &ForumConfig) -> Self {
        Self {
            gateway,
            store,
            roster: config.roster().clone(),
            round: config.round().clone(),
            context: ContextBuilder::new(*config.context()),
            parent_policy: ParentPolicy::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self) -> Result<RoundSummary, RunRoundError> {
        self.execute_with_progress(&NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        progress: &dyn RoundProgressNotifier,
    ) -> Result<RoundSummary, RunRoundError> {
        let agents = self.store.list_agents().await?;
        if agents.is_empty() {
            return Err(RunRoundError::NoAgents);
        }

        let round_id = RoundId::generate();
        let mut rng = match self.round.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let authors = AuthorLabels::from_agents(&agents);
        let active = pick_active_agents(&agents, self.roster.active_agents, &mut rng);
        let semaphore = Arc::new(Semaphore::new(self.round.permits()));

        info!(
            "Starting round {} with {} of {} agents",
            round_id,
            active.len(),
            agents.len()
        );
        self.logger.log(ConversationEvent::new(
            "round_start",
            json!({ "round_id": round_id.as_str(), "active_agents": active.len() }),
        ));

        // Wave 1: Threads
        let existing = self.store.recent_threads(self.round.candidate_limit).await?;
        let cold_start = existing.is_empty();
        if cold_start {
            info!("No threads yet, cold start");
        }
        let replies = self.store.recent_replies(self.context.limits().replies).await?;
        let global = self.context.global_context(&existing, &replies, &authors);
        let acting = self.round.thread_selection().select(&active, &mut rng);
        let threads = self
            .thread_wave(&semaphore, &round_id, acting, global, cold_start, progress)
            .await?;

        // Wave 2: Replies
        let threads_now = self.store.recent_threads(self.round.candidate_limit).await?;
        let replies_now = self.store.recent_replies(self.round.candidate_limit).await?;
        let replies = if threads_now.is_empty() {
            warn!("No threads to reply to, skipping reply wave");
            progress.on_wave_skipped(Wave::Replies, "no threads");
            Vec::new()
        } else {
            let acting = self.round.reply_selection().select(&active, &mut rng);
            let jobs = self.reply_jobs(acting, &threads_now, &replies_now, &authors, &mut rng);
            self.reply_wave(&semaphore, &round_id, jobs, progress).await?
        };

        // Wave 3: Votes
        let candidates = self.store.recent_posts(self.round.candidate_limit).await?;
        let votes = if candidates.is_empty() {
            warn!("No posts to vote on, skipping vote wave");
            progress.on_wave_skipped(Wave::Votes, "no posts");
            Vec::new()
        } else {
            let acting = self.round.vote_selection().select(&active, &mut rng);
            let votes: Vec<(String, NewVote)> = acting
                .iter()
                .filter_map(|agent| {
                    let target = candidates.choose(&mut rng)?;
                    let direction =
                        decide_vote(&agent.slug, &target.id, self.round.vote_up_probability);
                    Some((
                        agent.slug.clone(),
                        NewVote {
                            post_id: target.id.clone(),
                            agent_id: agent.id.clone(),
                            direction,
                        },
                    ))
                })
                .collect();
            self.vote_wave(votes, progress).await?
        };

        let summary = RoundSummary {
            round_id,
            cold_start,
            threads: threads.len(),
            replies: replies.len(),
            votes: votes.len(),
        };
        info!(
            "Round {} complete: {} threads, {} replies, {} votes",
            summary.round_id, summary.threads, summary.replies, summary.votes
        );
        self.logger.log(ConversationEvent::new(
            "round_complete",
            json!({
                "round_id": summary.round_id.as_str(),
                "threads": summary.threads,
                "replies": summary.replies,
                "votes": summary.votes,
            }),
        ));
        Ok(summary)
    }

    /// Wave 1: each acting agent writes and commits one thread
    async fn thread_wave(
        &self,
        semaphore: &Arc<Semaphore>,
        round_id: &RoundId,
        acting: Vec<Agent>,
        context: String,
        cold_start: bool,
        progress: &dyn RoundProgressNotifier,
    ) -> Result<Vec<Post>, RunRoundError> {
        info!("Wave 1: Threads ({} tasks)", acting.len());
        progress.on_wave_start(Wave::Threads, acting.len());

        let jobs = acting.into_iter().map(|a| (a.slug.clone(), a)).collect();
        let context = Arc::new(context);
        let on_complete = |slug: &str, ok: bool| progress.on_task_complete(Wave::Threads, slug, ok);
        let posts = run_bounded(semaphore, Wave::Threads.as_str(), jobs, |agent: Agent| {
            let gateway = Arc::clone(&self.gateway);
            let store = Arc::clone(&self.store);
            let logger = Arc::clone(&self.logger);
            let context = Arc::clone(&context);
            let round_id = round_id.clone();
            async move {
                let draft = gateway.generate_thread(&agent, &context, cold_start).await?;
                let row = NewPost::thread(agent.id.clone(), draft.title, draft.body, round_id);
                let post = store.insert_post(&row).await?;
                debug!("{} opened thread {}", agent.slug, post.id);
                log_commit(logger.as_ref(), &agent, &post);
                Ok::<_, RunRoundError>(post)
            }
        }, &on_complete)
        .await?;

        progress.on_wave_complete(Wave::Threads);
        Ok(posts)
    }

    /// Pair every acting agent with a parent thread and its prompt context.
    fn reply_jobs(
        &self,
        acting: Vec<Agent>,
        threads: &[Post],
        replies: &[Post],
        authors: &AuthorLabels,
        rng: &mut StdRng,
    ) -> Vec<(String, ReplyJob)> {
        let index = ReplyIndex::from_replies(replies);
        let global = self.context.global_context(threads, replies, authors);

        acting
            .into_iter()
            .filter_map(|agent| {
                let parent = self.parent_policy.pick(threads, &mut *rng)?.clone();
                let thread = self.context.thread_context(&parent, &index, authors);
                let context = ContextBuilder::combine(&[&global, &thread]);
                Some((
                    agent.slug.clone(),
                    ReplyJob {
                        agent,
                        parent,
                        context,
                    },
                ))
            })
            .collect()
    }

    /// Wave 2: each job writes and commits one reply
    async fn reply_wave(
        &self,
        semaphore: &Arc<Semaphore>,
        round_id: &RoundId,
        jobs: Vec<(String, ReplyJob)>,
        progress: &dyn RoundProgressNotifier,
    ) -> Result<Vec<Post>, RunRoundError> {
        info!("Wave 2: Replies ({} tasks)", jobs.len());
        progress.on_wave_start(Wave::Replies, jobs.len());

        let on_complete = |slug: &str, ok: bool| progress.on_task_complete(Wave::Replies, slug, ok);
        let posts = run_bounded(semaphore, Wave::Replies.as_str(), jobs, |job: ReplyJob| {
            let gateway = Arc::clone(&self.gateway);
            let store = Arc::clone(&self.store);
            let logger = Arc::clone(&self.logger);
            let round_id = round_id.clone();
            async move {
                let ReplyJob {
                    agent,
                    parent,
                    context,
                } = job;
                let draft = gateway.generate_reply(&agent, &parent, &context).await?;
                let row = NewPost::reply(agent.id.clone(), &parent, draft.body, round_id);
                let post = store.insert_post(&row).await?;
                debug!("{} replied to {} with {}", agent.slug, parent.id, post.id);
                log_commit(logger.as_ref(), &agent, &post);
                Ok::<_, RunRoundError>(post)
            }
        }, &on_complete)
        .await?;

        progress.on_wave_complete(Wave::Replies);
        Ok(posts)
    }

    /// Wave 3: commit all votes in one batch
    async fn vote_wave(
        &self,
        votes: Vec<(String, NewVote)>,
        progress: &dyn RoundProgressNotifier,
    ) -> Result<Vec<NewVote>, RunRoundError> {
        info!("Wave 3: Votes ({} votes)", votes.len());
        progress.on_wave_start(Wave::Votes, votes.len());

        let (voters, votes): (Vec<String>, Vec<NewVote>) = votes.into_iter().unzip();
        if !votes.is_empty() {
            self.store.insert_votes(&votes).await?;
        }
        for voter in &voters {
            progress.on_task_complete(Wave::Votes, voter, true);
        }
        self.logger.log(ConversationEvent::new(
            "votes_committed",
            json!({ "votes": votes }),
        ));

        progress.on_wave_complete(Wave::Votes);
        Ok(votes)
    }
}

/// Input of one reply task
struct ReplyJob {
    agent: Agent,
    parent: Post,
    context: String,
}

fn log_commit(logger: &dyn ConversationLogger, agent: &Agent, post: &Post) {
    logger.log(ConversationEvent::new(
        "post_committed",
        json!({
            "agent": agent.slug,
            "post_id": post.id.as_str(),
            "parent_id": post.parent_id.as_ref().map(|p| p.as_str()),
            "depth": post.depth,
            "title": post.title,
            "body": post.body,
        }),
    ));
}
