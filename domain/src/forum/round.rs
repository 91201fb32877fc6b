//! Round identifiers and waves.

use serde::{Deserialize, Serialize};

/// Correlation key stamped on every post produced by one round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(String);

impl RoundId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id for a generated round.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Id for a seed batch, e.g. `seed-1767322800000`.
    pub fn seed(timestamp_millis: i64) -> Self {
        Self(format!("seed-{}", timestamp_millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the three sequential phases of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wave {
    Threads,
    Replies,
    Votes,
}

impl Wave {
    pub fn as_str(&self) -> &'static str {
        match self {
            Wave::Threads => "threads",
            Wave::Replies => "replies",
            Wave::Votes => "votes",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Wave::Threads => "Thread Wave",
            Wave::Replies => "Reply Wave",
            Wave::Votes => "Vote Wave",
        }
    }
}

impl std::fmt::Display for Wave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
