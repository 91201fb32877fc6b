//! Forum domain module
//!
//! Posts, votes, rounds and the selection policies a round uses to decide
//! who acts and where.

pub mod post;
pub mod round;
pub mod selection;
pub mod vote;

pub use post::{NewPost, Post, PostId};
pub use round::{RoundId, Wave};
pub use selection::{AgentSelection, ParentPolicy, pick_active_agents};
pub use vote::{NewVote, VoteDirection, decide_vote};
