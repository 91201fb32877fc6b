//! Roster and round parameters.

use forum_domain::AgentSelection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which agents exist and which of them take part in a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterParams {
    /// Number of agent slots (`agent-001` ..= `agent-NNN`).
    pub agent_count: usize,
    /// Size of the random active subset; 0 means every agent.
    pub active_agents: usize,
    /// Parent directory of the per-agent runtime workspaces.
    pub agents_dir: PathBuf,
}

impl Default for RosterParams {
    fn default() -> Self {
        Self {
            agent_count: 100,
            active_agents: 0,
            agents_dir: PathBuf::from("agents"),
        }
    }
}

/// Shape of one round: how many tasks each wave runs, and how.
///
/// | Wave | Per-agent setting | Otherwise |
/// |------|-------------------|-----------|
/// | Threads | `post_each_agent` (once each) | `new_threads` random picks |
/// | Replies | `replies_per_agent` when > 0 | `new_replies` random picks |
/// | Votes | `votes_per_agent` each | no votes |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundParams {
    pub new_threads: usize,
    pub post_each_agent: bool,
    pub new_replies: usize,
    pub replies_per_agent: usize,
    pub votes_per_agent: usize,
    pub vote_up_probability: f64,
    /// Tasks in flight at once within a wave.
    pub max_concurrency: usize,
    /// How many recent posts the reply and vote waves choose from.
    pub candidate_limit: usize,
    /// Fixed RNG seed for reproducible selection.
    pub seed: Option<u64>,
}

impl Default for RoundParams {
    fn default() -> Self {
        Self {
            new_threads: 10,
            post_each_agent: false,
            new_replies: 30,
            replies_per_agent: 0,
            votes_per_agent: 1,
            vote_up_probability: 0.7,
            max_concurrency: 6,
            candidate_limit: 200,
            seed: None,
        }
    }
}

impl RoundParams {
    pub fn thread_selection(&self) -> AgentSelection {
        if self.post_each_agent {
            AgentSelection::EachActive { times: 1 }
        } else {
            AgentSelection::RandomPicks {
                count: self.new_threads,
            }
        }
    }

    pub fn reply_selection(&self) -> AgentSelection {
        AgentSelection::per_agent_or_random(self.replies_per_agent, self.new_replies)
    }

    pub fn vote_selection(&self) -> AgentSelection {
        AgentSelection::EachActive {
            times: self.votes_per_agent,
        }
    }

    /// At least one permit, whatever was configured.
    pub fn permits(&self) -> usize {
        self.max_concurrency.max(1)
    }

    // ==================== Builder Methods ====================

    pub fn with_new_threads(mut self, count: usize) -> Self {
        self.new_threads = count;
        self
    }

    pub fn with_new_replies(mut self, count: usize) -> Self {
        self.new_replies = count;
        self
    }

    pub fn with_votes_per_agent(mut self, count: usize) -> Self {
        self.votes_per_agent = count;
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
