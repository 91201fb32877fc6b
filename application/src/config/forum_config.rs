//! Forum configuration container.
//!
//! [`ForumConfig`] groups the split parameter types. It is built once by the
//! binary and never mutated afterwards; use cases clone the slices they
//! need.

use crate::config::{GenerationParams, RosterParams, RoundParams};
use forum_domain::ContextLimits;

#[derive(Debug, Clone, Default)]
pub struct ForumConfig {
    roster: RosterParams,
    round: RoundParams,
    context: ContextLimits,
    generation: GenerationParams,
}

impl ForumConfig {
    pub fn new(
        roster: RosterParams,
        round: RoundParams,
        context: ContextLimits,
        generation: GenerationParams,
    ) -> Self {
        Self {
            roster,
            round,
            context,
            generation,
        }
    }

    // ==================== Accessors ====================

    pub fn roster(&self) -> &RosterParams {
        &self.roster
    }

    pub fn round(&self) -> &RoundParams {
        &self.round
    }

    pub fn context(&self) -> &ContextLimits {
        &self.context
    }

    pub fn generation(&self) -> &GenerationParams {
        &self.generation
    }

    // ==================== Builder Methods ====================

    pub fn with_roster(mut self, roster: RosterParams) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_round(mut self, round: RoundParams) -> Self {
        self.round = round;
        self
    }

    pub fn with_context(mut self, context: ContextLimits) -> Self {
        self.context = context;
        self
    }

    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.generation = generation;
        self
    }
}
