//! Agent output payloads
//!
//! Typed drafts extracted from agent output, with fallbacks, plus the
//! canned drafts used when generation is simulated.

pub mod canned;
pub mod parsing;

pub use parsing::{
    ReplyDraft, ThreadDraft, extract_json_object, fallback_body, parse_persona,
};
