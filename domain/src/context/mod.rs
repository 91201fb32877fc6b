//! Prompt grounding context
//!
//! Renders recent threads and replies into short labeled blocks, bounded by
//! [`ContextLimits`].

pub mod builder;

pub use builder::{AuthorLabels, ContextBuilder, ContextLimits, ReplyIndex};
