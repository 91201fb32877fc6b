//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod agent_gateway;
pub mod reconcile_agents;
pub mod refresh_personas;
pub mod report_agents;
pub mod run_round;
pub mod seed_forum;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod testing;
