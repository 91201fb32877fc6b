//! Votes and the vote decision function.
//!
//! The direction of every vote is a pure function of the voting agent's slug
//! and the target post id, so "why did agent X vote this way" can always be
//! answered by recomputing [`decide_vote`].

use crate::agent::AgentId;
use crate::core::error::DomainError;
use crate::core::hash::stable_hash;
use crate::forum::post::PostId;
use serde::{Deserialize, Serialize};

/// Direction of a vote, stored as `+1` / `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i64")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_i8(&self) -> i8 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

impl From<VoteDirection> for i8 {
    fn from(direction: VoteDirection) -> Self {
        direction.as_i8()
    }
}

impl TryFrom<i64> for VoteDirection {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteDirection::Up),
            -1 => Ok(VoteDirection::Down),
            other => Err(DomainError::InvalidVoteDirection(other)),
        }
    }
}

/// A vote row to be committed. At most one per (post, agent) survives in
/// the store; duplicates are dropped there, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewVote {
    pub post_id: PostId,
    pub agent_id: AgentId,
    pub direction: VoteDirection,
}

/// Decide how `agent_slug` votes on `post_id`.
///
/// `stable_hash("<slug>:<post id>") mod 100`, scaled to [0, 1), is compared
/// against `up_probability`.
pub fn decide_vote(agent_slug: &str, post_id: &PostId, up_probability: f64) -> VoteDirection {
    let seed = stable_hash(&format!("{}:{}", agent_slug, post_id));
    let roll = (seed % 100) as f64 / 100.0;
    if roll < up_probability {
        VoteDirection::Up
    } else {
        VoteDirection::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_is_deterministic() {
        let post = PostId::new("123");
        let first = decide_vote("agent-001", &post, 0.7);
        for _ in 0..10 {
            assert_eq!(decide_vote("agent-001", &post, 0.7), first);
        }
    }

    #[test]
    fn test_decision_is_order_independent() {
        let posts: Vec<PostId> = (0..50).map(|i| PostId::new(i.to_string())).collect();
        let forward: Vec<_> = posts.iter().map(|p| decide_vote("agent-007", p, 0.5)).collect();
        let mut backward: Vec<_> = posts
            .iter()
            .rev()
            .map(|p| decide_vote("agent-007", p, 0.5))
            .collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_probability_bounds() {
        for i in 0..100 {
            let post = PostId::new(format!("p{}", i));
            assert_eq!(decide_vote("agent-002", &post, 1.0), VoteDirection::Up);
            assert_eq!(decide_vote("agent-002", &post, 0.0), VoteDirection::Down);
        }
    }

    #[test]
    fn test_matches_hash_formula() {
        let post = PostId::new("42");
        let roll = (stable_hash("agent-003:42") % 100) as f64 / 100.0;
        let expected = if roll < 0.7 {
            VoteDirection::Up
        } else {
            VoteDirection::Down
        };
        assert_eq!(decide_vote("agent-003", &post, 0.7), expected);
    }

    #[test]
    fn test_direction_serializes_as_integer() {
        let vote = NewVote {
            post_id: PostId::new("9"),
            agent_id: AgentId::new("1"),
            direction: VoteDirection::Down,
        };
        let json = serde_json::to_value(&vote).unwrap();
        assert_eq!(json["direction"], -1);

        let back: NewVote = serde_json::from_value(json).unwrap();
        assert_eq!(back.direction, VoteDirection::Down);
    }

    #[test]
    fn test_invalid_direction_rejected() {
        assert!(VoteDirection::try_from(0).is_err());
        assert!(serde_json::from_str::<VoteDirection>("2").is_err());
    }
}
