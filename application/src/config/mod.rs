//! Application-level configuration.
//!
//! One immutable [`ForumConfig`] is built at startup and handed to every use
//! case constructor:
//!
//! - [`RosterParams`]: agent pool size, active subset, workspaces
//! - [`RoundParams`]: wave sizes, vote probability, concurrency cap
//! - [`GenerationParams`]: model, timeout, simulation and style toggles
//! - [`ContextLimits`](forum_domain::ContextLimits): prompt context bounds

pub mod forum_config;
pub mod generation_params;
pub mod round_params;

pub use forum_config::ForumConfig;
pub use generation_params::GenerationParams;
pub use round_params::{RosterParams, RoundParams};
