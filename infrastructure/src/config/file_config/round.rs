//! Roster, round and context sections (`[roster]`, `[round]`, `[context]`)
//!
//! Example configuration:
//!
//! ```toml
//! [roster]
//! agent_count = 100
//! active_agents = 20
//!
//! [round]
//! new_threads = 10
//! new_replies = 30
//! votes_per_agent = 1
//! max_concurrency = 6
//!
//! [context]
//! threads = 6
//! replies = 6
//! thread_replies = 4
//! ```

use forum_application::RoundParams;
use forum_domain::ContextLimits;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRosterConfig {
    /// Number of agent slots
    pub agent_count: usize,
    /// Random subset taking part in each round (0 = all)
    pub active_agents: usize,
}

impl Default for FileRosterConfig {
    fn default() -> Self {
        Self {
            agent_count: 100,
            active_agents: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoundConfig {
    pub new_threads: usize,
    /// Every active agent opens one thread (overrides `new_threads`)
    pub post_each_agent: bool,
    pub new_replies: usize,
    /// Replies per active agent (overrides `new_replies` when > 0)
    pub replies_per_agent: usize,
    pub votes_per_agent: usize,
    pub vote_up_probability: f64,
    pub max_concurrency: usize,
    pub candidate_limit: usize,
    pub seed: Option<u64>,
}

impl Default for FileRoundConfig {
    fn default() -> Self {
        let params = RoundParams::default();
        Self {
            new_threads: params.new_threads,
            post_each_agent: params.post_each_agent,
            new_replies: params.new_replies,
            replies_per_agent: params.replies_per_agent,
            votes_per_agent: params.votes_per_agent,
            vote_up_probability: params.vote_up_probability,
            max_concurrency: params.max_concurrency,
            candidate_limit: params.candidate_limit,
            seed: params.seed,
        }
    }
}

impl FileRoundConfig {
    pub fn to_round_params(&self) -> RoundParams {
        RoundParams {
            new_threads: self.new_threads,
            post_each_agent: self.post_each_agent,
            new_replies: self.new_replies,
            replies_per_agent: self.replies_per_agent,
            votes_per_agent: self.votes_per_agent,
            vote_up_probability: self.vote_up_probability,
            max_concurrency: self.max_concurrency,
            candidate_limit: self.candidate_limit,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    pub threads: usize,
    pub replies: usize,
    pub thread_replies: usize,
}

impl Default for FileContextConfig {
    fn default() -> Self {
        let limits = ContextLimits::default();
        Self {
            threads: limits.threads,
            replies: limits.replies,
            thread_replies: limits.thread_replies,
        }
    }
}

impl FileContextConfig {
    pub fn to_context_limits(&self) -> ContextLimits {
        ContextLimits {
            threads: self.threads,
            replies: self.replies,
            thread_replies: self.thread_replies,
        }
    }
}
