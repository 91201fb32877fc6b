//! Pseudo-random selection policies used by the round scheduler.
//!
//! All functions take the random source explicitly so a seeded RNG makes a
//! whole round reproducible.

use crate::agent::Agent;
use crate::forum::post::Post;
use rand::Rng;
use rand::seq::SliceRandom;

/// Number of most recent threads forming the "hot" set.
pub const HOT_WINDOW: usize = 10;

/// Probability of replying inside the hot set.
pub const HOT_PROBABILITY: f64 = 0.7;

/// Random subset of `active` agents; `0` (or a count at least the pool
/// size) keeps everyone.
pub fn pick_active_agents<R: Rng + ?Sized>(agents: &[Agent], active: usize, rng: &mut R) -> Vec<Agent> {
    if active == 0 || active >= agents.len() {
        return agents.to_vec();
    }
    let mut pool = agents.to_vec();
    pool.shuffle(rng);
    pool.truncate(active);
    pool
}

/// How the acting agents of a wave are chosen from the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentSelection {
    /// Every active agent acts `times` times.
    EachActive { times: usize },
    /// `count` independent uniform picks (repeats allowed).
    RandomPicks { count: usize },
}

impl AgentSelection {
    /// Selection used by the reply and vote waves: per-agent counts win
    /// when positive, otherwise a fixed number of random picks.
    pub fn per_agent_or_random(per_agent: usize, random_count: usize) -> Self {
        if per_agent > 0 {
            AgentSelection::EachActive { times: per_agent }
        } else {
            AgentSelection::RandomPicks {
                count: random_count,
            }
        }
    }

    pub fn select<R: Rng + ?Sized>(&self, active: &[Agent], rng: &mut R) -> Vec<Agent> {
        match *self {
            AgentSelection::EachActive { times } => active
                .iter()
                .flat_map(|agent| std::iter::repeat_n(agent.clone(), times))
                .collect(),
            AgentSelection::RandomPicks { count } => {
                if active.is_empty() {
                    return Vec::new();
                }
                (0..count)
                    .filter_map(|_| active.choose(rng).cloned())
                    .collect()
            }
        }
    }
}

/// Biased choice of a reply parent.
///
/// With probability `hot_probability` the parent is drawn uniformly from the
/// `min(hot_window, len)` most recent threads, otherwise uniformly from all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentPolicy {
    pub hot_window: usize,
    pub hot_probability: f64,
}

impl Default for ParentPolicy {
    fn default() -> Self {
        Self {
            hot_window: HOT_WINDOW,
            hot_probability: HOT_PROBABILITY,
        }
    }
}

impl ParentPolicy {
    /// `threads` must be ordered most recent first.
    pub fn pick<'a, R: Rng + ?Sized>(&self, threads: &'a [Post], rng: &mut R) -> Option<&'a Post> {
        if threads.is_empty() {
            return None;
        }
        let hot = &threads[..self.hot_window.min(threads.len()).max(1)];
        if rng.gen_bool(self.hot_probability.clamp(0.0, 1.0)) {
            hot.choose(rng)
        } else {
            threads.choose(rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentId;
    use crate::forum::post::{NewPost, PostId};
    use crate::forum::round::RoundId;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn agents(n: usize) -> Vec<Agent> {
        (1..=n)
            .map(|i| Agent {
                id: AgentId::new(i.to_string()),
                slug: format!("agent-{:03}", i),
                display_name: format!("Agent {:03}", i),
                anon_index: Some(i as u32),
                persona: None,
                avatar_url: None,
            })
            .collect()
    }

    fn threads(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                NewPost::thread(AgentId::new("1"), "t", "b", RoundId::new("r"))
                    .into_post(PostId::new(i.to_string()), Utc::now())
            })
            .collect()
    }

    #[test]
    fn test_active_zero_keeps_everyone() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_active_agents(&agents(5), 0, &mut rng).len(), 5);
        assert_eq!(pick_active_agents(&agents(5), 9, &mut rng).len(), 5);
    }

    #[test]
    fn test_active_subset_is_distinct() {
        let mut rng = StdRng::seed_from_u64(2);
        let picked = pick_active_agents(&agents(20), 4, &mut rng);
        assert_eq!(picked.len(), 4);
        let mut slugs: Vec<_> = picked.iter().map(|a| a.slug.clone()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), 4);
    }

    #[test]
    fn test_each_active_repeats() {
        let mut rng = StdRng::seed_from_u64(3);
        let acting = AgentSelection::EachActive { times: 2 }.select(&agents(3), &mut rng);
        let slugs: Vec<_> = acting.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["agent-001", "agent-001", "agent-002", "agent-002", "agent-003", "agent-003"]
        );
    }

    #[test]
    fn test_random_picks_count() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            AgentSelection::RandomPicks { count: 7 }
                .select(&agents(3), &mut rng)
                .len(),
            7
        );
        assert!(AgentSelection::RandomPicks { count: 7 }
            .select(&[], &mut rng)
            .is_empty());
    }

    #[test]
    fn test_per_agent_or_random() {
        assert_eq!(
            AgentSelection::per_agent_or_random(2, 30),
            AgentSelection::EachActive { times: 2 }
        );
        assert_eq!(
            AgentSelection::per_agent_or_random(0, 30),
            AgentSelection::RandomPicks { count: 30 }
        );
    }

    #[test]
    fn test_parent_pick_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(ParentPolicy::default().pick(&[], &mut rng).is_none());
    }

    #[test]
    fn test_parent_pick_always_hot() {
        let policy = ParentPolicy {
            hot_window: 3,
            hot_probability: 1.0,
        };
        let threads = threads(20);
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            let parent = policy.pick(&threads, &mut rng).unwrap();
            let index: usize = parent.id.as_str().parse().unwrap();
            assert!(index < 3);
        }
    }

    #[test]
    fn test_parent_pick_biased_towards_hot_set() {
        let policy = ParentPolicy::default();
        let threads = threads(100);
        let mut rng = StdRng::seed_from_u64(7);
        let hot_hits = (0..2000)
            .filter(|_| {
                let parent = policy.pick(&threads, &mut rng).unwrap();
                parent.id.as_str().parse::<usize>().unwrap() < HOT_WINDOW
            })
            .count();
        // Expected share: 0.7 + 0.3 * 10/100 = 0.73
        assert!(hot_hits > 1300 && hot_hits < 1600, "hot hits {}", hot_hits);
    }

    #[test]
    fn test_parent_pick_fewer_threads_than_window() {
        let threads = threads(2);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            assert!(ParentPolicy::default().pick(&threads, &mut rng).is_some());
        }
    }
}
